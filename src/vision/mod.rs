//! Google Cloud Vision (images:annotate) 連携
//!
//! ラベル検出＋物体検出を1リクエストで呼び出し、生レスポンスを返す。
//! 失敗は全て型付きエラーに変換し、自動リトライはしない。

mod http;

pub use http::{JsonPoster, PostResponse, ReqwestPoster};

use crate::error::{MiamzError, Result};
use base64::{engine::general_purpose, Engine as _};
use miamz_common::VisionResponse;
use serde::Serialize;

/// images:annotate リクエスト
#[derive(Debug, Serialize)]
struct AnnotateRequest {
    requests: Vec<AnnotateImageRequest>,
}

#[derive(Debug, Serialize)]
struct AnnotateImageRequest {
    image: ImageContent,
    features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
    max_results: u32,
}

/// リクエスト本文を組み立てる
pub fn build_request(image_base64: &str, max_results: u32) -> Result<serde_json::Value> {
    let request = AnnotateRequest {
        requests: vec![AnnotateImageRequest {
            image: ImageContent {
                content: image_base64.to_string(),
            },
            features: vec![
                Feature {
                    kind: "LABEL_DETECTION",
                    max_results,
                },
                Feature {
                    kind: "OBJECT_LOCALIZATION",
                    max_results,
                },
            ],
        }],
    };

    Ok(serde_json::to_value(request)?)
}

/// Vision APIクライアント
#[derive(Debug, Clone)]
pub struct VisionClient<P> {
    poster: P,
    api_key: String,
    endpoint: String,
    max_results: u32,
}

impl<P: JsonPoster> VisionClient<P> {
    pub fn new(poster: P, api_key: String, endpoint: String, max_results: u32) -> Self {
        Self {
            poster,
            api_key,
            endpoint,
            max_results,
        }
    }

    /// 画像を解析して生レスポンスを返す
    ///
    /// - 2xx以外 → `Upstream`（本文の error.message があればそれを使う）
    /// - 本文がJSONでない → `MalformedResponse`
    /// - responses[0].error あり → `ServiceReported`
    pub async fn annotate(&self, image: &[u8]) -> Result<VisionResponse> {
        if self.api_key.trim().is_empty() {
            return Err(MiamzError::MissingApiKey);
        }

        let encoded = general_purpose::STANDARD.encode(image);
        let body = build_request(&encoded, self.max_results)?;
        let url = format!("{}?key={}", self.endpoint, self.api_key);

        tracing::info!(bytes = image.len(), endpoint = %self.endpoint, "calling Vision API");
        let response = self.poster.post_json(&url, &body).await?;

        if !response.is_success() {
            let message = upstream_message(&response.body);
            tracing::error!(status = response.status, %message, "Vision API returned an error status");
            return Err(MiamzError::Upstream {
                status: response.status,
                message,
            });
        }

        let parsed: VisionResponse = serde_json::from_str(&response.body)
            .map_err(|e| MiamzError::MalformedResponse(e.to_string()))?;

        if let Some(status) = parsed.first().and_then(|r| r.error.as_ref()) {
            tracing::error!(code = status.code, message = %status.message, "Vision API reported an error");
            return Err(miamz_common::Error::ServiceReported {
                code: status.code,
                message: status.message.clone(),
            }
            .into());
        }

        Ok(parsed)
    }
}

/// エラー本文からメッセージを取り出す（JSONでなければ本文そのまま）
fn upstream_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_shape() {
        let body = build_request("aGVsbG8=", 20).unwrap();
        let request = &body["requests"][0];
        assert_eq!(request["image"]["content"], "aGVsbG8=");
        assert_eq!(request["features"][0]["type"], "LABEL_DETECTION");
        assert_eq!(request["features"][0]["maxResults"], 20);
        assert_eq!(request["features"][1]["type"], "OBJECT_LOCALIZATION");
        assert_eq!(request["features"][1]["maxResults"], 20);
    }

    #[test]
    fn test_upstream_message_from_json() {
        let body = r#"{"error": {"code": 403, "message": "API key not valid.", "status": "PERMISSION_DENIED"}}"#;
        assert_eq!(upstream_message(body), "API key not valid.");
    }

    #[test]
    fn test_upstream_message_plain_text() {
        assert_eq!(upstream_message("Service Unavailable\n"), "Service Unavailable");
    }
}
