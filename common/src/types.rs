//! 型定義
//!
//! CLIと共通ロジックで共有される型:
//! - VisionResponse: Vision API (images:annotate) のレスポンス
//! - Label: ラベル/物体検出を統一した1件分の注釈
//! - Recipe: レシピカタログの1エントリ

use serde::{Deserialize, Serialize};
use std::fmt;

/// Vision API レスポンス全体
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisionResponse {
    #[serde(default)]
    pub responses: Vec<AnnotateImageResponse>,
}

impl VisionResponse {
    /// 先頭の結果ブロック（1リクエスト1画像なので先頭のみ使う）
    pub fn first(&self) -> Option<&AnnotateImageResponse> {
        self.responses.first()
    }
}

/// 画像1枚分の解析結果ブロック
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateImageResponse {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub label_annotations: Vec<LabelAnnotation>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub localized_object_annotations: Vec<LocalizedObjectAnnotation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ServiceStatus>,
}

impl AnnotateImageResponse {
    /// ラベル検出 → 物体検出の順で注釈を列挙
    pub fn annotations(&self) -> impl Iterator<Item = Label<'_>> {
        let labels = self.label_annotations.iter().map(|l| Label {
            text: &l.description,
            score: l.score.unwrap_or(0.0),
            source: LabelSource::Label,
        });
        let objects = self.localized_object_annotations.iter().map(|o| Label {
            text: &o.name,
            score: o.score.unwrap_or(0.0),
            source: LabelSource::Object,
        });
        labels.chain(objects)
    }
}

/// ラベル検出結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelAnnotation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mid: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

/// 物体検出結果（位置情報は使わない）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalizedObjectAnnotation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mid: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

/// レスポンスブロックに埋め込まれるエラー
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceStatus {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

/// 注釈の出どころ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSource {
    Label,
    Object,
}

/// テキスト+スコアに正規化した注釈
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Label<'a> {
    pub text: &'a str,
    /// スコア欠落時は0.0
    pub score: f32,
    pub source: LabelSource,
}

/// 難易度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    #[serde(rename = "Facile", alias = "Easy")]
    Easy,
    #[serde(rename = "Moyen", alias = "Medium")]
    Medium,
    #[serde(rename = "Difficile", alias = "Hard")]
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Facile"),
            Difficulty::Medium => write!(f, "Moyen"),
            Difficulty::Hard => write!(f, "Difficile"),
        }
    }
}

/// 栄養成分（1人前）
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// レシピ
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: u32,
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub prep_time: String,
    #[serde(default)]
    pub cook_time: String,
    #[serde(default)]
    pub total_time: String,

    #[serde(default)]
    pub servings: u32,

    #[serde(default)]
    pub difficulty: Difficulty,

    #[serde(default)]
    pub rating: f32,

    /// カテゴリ（Quick / Breakfast / Lunch / Dinner / Snacks ...）
    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub cuisine: String,

    #[serde(default)]
    pub dietary_restrictions: Vec<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    pub ingredients: Vec<String>,

    #[serde(default)]
    pub instructions: Vec<String>,

    #[serde(default)]
    pub nutrition: Nutrition,

    #[serde(default)]
    pub image: String,

    /// ブックマーク状態（ローカルのみ、永続化しない）
    #[serde(default)]
    pub is_bookmarked: bool,
}
