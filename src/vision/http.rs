//! HTTP送信の差し替え口
//!
//! Vision API呼び出しを `JsonPoster` 越しに行うことで、
//! テストではネットワーク無しで応答を差し替えられる。

use crate::error::{MiamzError, Result};
use std::future::Future;
use std::time::Duration;

/// POST結果（ステータスと本文のみ）
#[derive(Debug, Clone, PartialEq)]
pub struct PostResponse {
    pub status: u16,
    pub body: String,
}

impl PostResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// JSONをPOSTする能力
pub trait JsonPoster: Send + Sync {
    fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> impl Future<Output = Result<PostResponse>> + Send;
}

/// reqwestによる実装
#[derive(Debug, Clone)]
pub struct ReqwestPoster {
    client: reqwest::Client,
}

impl ReqwestPoster {
    pub fn new(timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self { client })
    }
}

impl JsonPoster for ReqwestPoster {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<PostResponse> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                // URLにAPIキーが含まれるので落とす
                let e = e.without_url();
                tracing::error!("Vision API request failed: {}", e);
                MiamzError::from(e)
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| MiamzError::from(e.without_url()))?;

        Ok(PostResponse { status, body })
    }
}
