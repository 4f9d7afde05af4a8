use crate::error::{MiamzError, Result};
use miamz_common::{IngredientTables, RecipeCatalog};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const API_KEY_ENV: &str = "GOOGLE_VISION_API_KEY";
pub const DEFAULT_ENDPOINT: &str = "https://vision.googleapis.com/v1/images:annotate";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub endpoint: String,
    /// ラベル採用の信頼度しきい値
    pub confidence_threshold: f32,
    /// レシピ採用に必要な材料一致割合
    pub min_overlap: f64,
    /// 各検出機能の最大件数
    pub max_results: u32,
    /// 送信前に縮小する長辺サイズ(px)
    pub max_image_size: u32,
    pub timeout_seconds: u64,
    /// 組み込みテーブルのプリセット名
    pub language: String,
    /// 追加のキーワード・翻訳テーブル(JSON)
    pub tables_path: Option<PathBuf>,
    /// 組み込みカタログの代わりに使うレシピJSON
    pub catalog_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.into(),
            confidence_threshold: miamz_common::DEFAULT_CONFIDENCE_THRESHOLD,
            min_overlap: miamz_common::DEFAULT_MIN_OVERLAP,
            max_results: 20,
            max_image_size: 1600,
            timeout_seconds: 30,
            language: "fr".into(),
            tables_path: None,
            catalog_path: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| MiamzError::Config("répertoire personnel introuvable".into()))?;
        Ok(home.join(".config").join("miamz").join("config.json"))
    }

    pub fn get_api_key(&self) -> Result<String> {
        // 環境変数を優先
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                return Ok(key);
            }
        }

        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(MiamzError::MissingApiKey)
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }

    /// しきい値が範囲内か検証
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(MiamzError::Config(format!(
                "confidence_threshold hors limites : {}",
                self.confidence_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.min_overlap) {
            return Err(MiamzError::Config(format!(
                "min_overlap hors limites : {}",
                self.min_overlap
            )));
        }
        Ok(())
    }

    /// プリセット＋追加ファイルからテーブルを構築（追加分が優先）
    pub fn load_tables(&self) -> Result<IngredientTables> {
        let mut tables = IngredientTables::from_preset(&self.language).ok_or_else(|| {
            MiamzError::Config(format!("langue inconnue : {}", self.language))
        })?;

        if let Some(path) = &self.tables_path {
            if !path.exists() {
                return Err(MiamzError::FileNotFound(path.display().to_string()));
            }
            let custom = IngredientTables::from_file(path)?;
            tables.merge(&custom);
        }

        tables.validate()?;
        Ok(tables)
    }

    pub fn load_catalog(&self) -> Result<RecipeCatalog> {
        match &self.catalog_path {
            Some(path) => {
                if !path.exists() {
                    return Err(MiamzError::FileNotFound(path.display().to_string()));
                }
                Ok(RecipeCatalog::from_file(path)?)
            }
            None => Ok(RecipeCatalog::builtin()?),
        }
    }
}
