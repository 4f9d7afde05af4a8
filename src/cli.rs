use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "miamz")]
#[command(about = "Scanne ton frigo et trouve des recettes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 写真（または写真フォルダ）から食材を検出してレシピを提案
    Scan {
        /// 写真ファイルまたはフォルダ
        #[arg(required = true)]
        path: PathBuf,

        /// ラベル採用の信頼度しきい値（0.0-1.0、省略時は設定値）
        #[arg(short, long)]
        threshold: Option<f32>,

        /// レシピ採用に必要な材料一致割合（0.0-1.0、省略時は設定値）
        #[arg(short, long)]
        min_overlap: Option<f64>,

        /// 表記ゆれ補正（tomate/laitue/fromage/œuf/poulet）を有効化
        #[arg(long)]
        anchors: bool,

        /// キャッシュを使用（同じ写真の再送信をスキップ）
        #[arg(long)]
        use_cache: bool,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,

        /// 失敗時・未検出時に撮り直しを対話で促す
        #[arg(short, long)]
        interactive: bool,
    },

    /// 保存済みのVision APIレスポンス(JSON)から食材を抽出
    Extract {
        /// レスポンスJSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 信頼度しきい値（省略時は設定値）
        #[arg(short, long)]
        threshold: Option<f32>,
    },

    /// 手持ち食材からレシピを照合
    Match {
        /// 食材名（複数可）
        #[arg(required = true)]
        ingredients: Vec<String>,

        /// 材料一致割合（省略時は設定値）
        #[arg(short, long)]
        min_overlap: Option<f64>,

        /// 表記ゆれ補正を有効化
        #[arg(long)]
        anchors: bool,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// レシピ一覧（カテゴリ・キーワードで絞り込み）
    Recipes {
        /// カテゴリ（All/Quick/Breakfast/Lunch/Dinner/Snacks）
        #[arg(short, long, default_value = "All")]
        category: String,

        /// キーワード検索
        #[arg(short, long)]
        search: Option<String>,

        /// ブックマーク済みのみ
        #[arg(short, long)]
        bookmarked: bool,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },

    /// キャッシュ管理
    Cache {
        /// キャッシュを削除
        #[arg(long)]
        clear: bool,

        /// 対象フォルダ（省略時はカレント）
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// キャッシュ情報を表示
        #[arg(long)]
        info: bool,
    },
}

/// コマンドライン引数の食材名から空白のみの要素を除く
pub fn non_blank_ingredients(ingredients: Vec<String>) -> Vec<String> {
    ingredients
        .into_iter()
        .filter(|i| !i.trim().is_empty())
        .collect()
}
