//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    /// カタログ内でレシピIDが重複している
    #[error("Duplicate recipe id: {0}")]
    DuplicateRecipeId(u32),

    /// Vision APIがレスポンス内でエラーを返した
    #[error("Vision API error ({code}): {message}")]
    ServiceReported { code: i64, message: String },
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
