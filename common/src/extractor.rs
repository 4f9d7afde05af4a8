//! 食材抽出ロジック
//!
//! Vision APIレスポンスのラベル検出・物体検出結果から、
//! 食材名（表示言語）の重複なしセットを生成する。

use crate::error::{Error, Result};
use crate::tables::IngredientTables;
use crate::types::VisionResponse;
use std::collections::BTreeSet;

/// 信頼度しきい値のデフォルト
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.3;

/// レスポンスから食材名を抽出
///
/// - `score >= threshold` の注釈のみ対象（スコア欠落は0扱い）
/// - 小文字化したテキストをキーワードと双方向部分一致で判定
/// - 一致したら翻訳してセットに追加（同じ訳語は1件にまとまる）
///
/// 結果ブロックに `error` がある場合はエラーを返す。
/// 注釈リストが無い場合は空セット。
///
/// # Examples
/// ```
/// use miamz_common::{extract_ingredients, IngredientTables, VisionResponse};
///
/// let json = r#"{"responses": [{"labelAnnotations": [
///     {"description": "Tomato", "score": 0.9},
///     {"description": "Car", "score": 0.95}
/// ]}]}"#;
/// let response: VisionResponse = serde_json::from_str(json).unwrap();
/// let tables = IngredientTables {
///     keywords: vec!["tomato".into()],
///     translations: [("tomato".to_string(), "tomate".to_string())].into(),
/// };
///
/// let found = extract_ingredients(&response, &tables, 0.3).unwrap();
/// assert_eq!(found.into_iter().collect::<Vec<_>>(), vec!["tomate".to_string()]);
/// ```
pub fn extract_ingredients(
    response: &VisionResponse,
    tables: &IngredientTables,
    threshold: f32,
) -> Result<BTreeSet<String>> {
    let mut detected = BTreeSet::new();

    let Some(block) = response.first() else {
        return Ok(detected);
    };

    if let Some(status) = &block.error {
        tracing::warn!(code = status.code, message = %status.message, "Vision API reported an error");
        return Err(Error::ServiceReported {
            code: status.code,
            message: status.message.clone(),
        });
    }

    for label in block.annotations() {
        let text = label.text.trim().to_lowercase();
        if text.is_empty() || label.score < threshold {
            continue;
        }

        if let Some(keyword) = tables.matching_keyword(&text) {
            let translated = tables.translate(&text);
            tracing::debug!(
                source = ?label.source,
                label = %text,
                keyword,
                score = label.score,
                ingredient = %translated,
                "food label detected"
            );
            if !translated.trim().is_empty() {
                detected.insert(translated);
            }
        }
    }

    Ok(detected)
}
