//! スキャン処理
//!
//! 写真読込 → Vision API → 食材抽出 → レシピ照合 を順番に実行する。
//! 同時に複数のスキャンが走った場合、最新のスキャン以外の結果は破棄する。

use crate::cache::{compute_hash, CacheFile};
use crate::error::{MiamzError, Result};
use crate::scanner::{prepare_for_upload, ImageInfo};
use crate::vision::{JsonPoster, VisionClient};
use miamz_common::{extract_ingredients, IngredientTables, MatchRules, Recipe, RecipeCatalog, RecipeMatch};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// スキャン世代カウンタ
#[derive(Debug, Default)]
pub struct ScanSession {
    generation: AtomicU64,
}

/// 開始時に払い出す世代番号
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanTicket(u64);

impl ScanSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新しいスキャンを開始（それ以前のチケットは無効になる）
    pub fn begin(&self) -> ScanTicket {
        ScanTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: ScanTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }
}

/// スキャン設定
#[derive(Debug, Clone)]
pub struct ScanSettings {
    pub confidence_threshold: f32,
    pub rules: MatchRules,
    pub max_image_size: u32,
    pub use_cache: bool,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            confidence_threshold: miamz_common::DEFAULT_CONFIDENCE_THRESHOLD,
            rules: MatchRules::default(),
            max_image_size: 1600,
            use_cache: false,
        }
    }
}

/// 提案レシピ
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub recipe: Recipe,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub match_count: usize,
    pub fraction: f64,
}

impl From<RecipeMatch<'_>> for Suggestion {
    fn from(m: RecipeMatch<'_>) -> Self {
        Self {
            recipe: m.recipe.clone(),
            matched: m.matched.iter().map(|s| s.to_string()).collect(),
            missing: m.missing.iter().map(|s| s.to_string()).collect(),
            match_count: m.match_count,
            fraction: m.fraction,
        }
    }
}

/// スキャン結果
#[derive(Debug)]
pub enum ScanOutcome {
    /// 食材を検出（提案0件もあり得る）
    Found {
        ingredients: Vec<String>,
        suggestions: Vec<Suggestion>,
    },
    /// 食材が1つも検出されなかった（エラーではない）
    NoIngredients,
    /// 解析失敗（撮り直しを促す）
    Failed(MiamzError),
    /// 後から開始したスキャンに追い越された
    Superseded,
}

impl ScanOutcome {
    /// 撮り直しを促す結果か（未検出、または解析失敗）
    pub fn offers_retake(&self) -> bool {
        match self {
            ScanOutcome::NoIngredients => true,
            ScanOutcome::Failed(e) => e.is_extraction_failure(),
            ScanOutcome::Found { .. } | ScanOutcome::Superseded => false,
        }
    }
}

/// スキャン処理本体
pub struct ScanPipeline<P> {
    client: VisionClient<P>,
    tables: IngredientTables,
    catalog: RecipeCatalog,
    settings: ScanSettings,
    session: Arc<ScanSession>,
}

impl<P: JsonPoster> ScanPipeline<P> {
    pub fn new(
        client: VisionClient<P>,
        tables: IngredientTables,
        catalog: RecipeCatalog,
        settings: ScanSettings,
    ) -> Self {
        Self {
            client,
            tables,
            catalog,
            settings,
            session: Arc::new(ScanSession::new()),
        }
    }

    pub fn catalog(&self) -> &RecipeCatalog {
        &self.catalog
    }

    pub fn session(&self) -> Arc<ScanSession> {
        Arc::clone(&self.session)
    }

    /// 写真から食材を検出（複数枚は和集合）
    pub async fn detect(&self, images: &[ImageInfo]) -> Result<BTreeSet<String>> {
        let mut ingredients = BTreeSet::new();

        for image in images {
            let found = self.detect_one(image).await?;
            tracing::info!(file = %image.file_name, count = found.len(), "ingredients detected");
            ingredients.extend(found);
        }

        Ok(ingredients)
    }

    async fn detect_one(&self, image: &ImageInfo) -> Result<BTreeSet<String>> {
        let bytes = std::fs::read(&image.path)?;
        let folder = image
            .path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_default();

        let hash = compute_hash(&bytes);
        let file_size = bytes.len() as u64;

        if self.settings.use_cache {
            let cache = CacheFile::load(&folder);
            if let Some(response) = cache.get(&hash) {
                tracing::debug!(file = %image.file_name, "cache hit");
                return Ok(extract_ingredients(response, &self.tables, self.settings.confidence_threshold)?);
            }
        }

        let upload = prepare_for_upload(bytes, self.settings.max_image_size)?;
        let response = self.client.annotate(&upload).await?;
        let ingredients = extract_ingredients(&response, &self.tables, self.settings.confidence_threshold)?;

        if self.settings.use_cache {
            let mut cache = CacheFile::load(&folder);
            cache.insert(hash, image.file_name.clone(), file_size, response);
            if let Err(e) = cache.save(&folder) {
                tracing::warn!("failed to save cache: {}", e);
            }
        }

        Ok(ingredients)
    }

    /// 手持ち食材からレシピを提案
    pub fn suggest<S: AsRef<str>>(&self, ingredients: &[S]) -> Vec<Suggestion> {
        self.settings
            .rules
            .rank(ingredients, self.catalog.recipes())
            .into_iter()
            .map(Suggestion::from)
            .collect()
    }

    /// 1回分のスキャンを実行
    pub async fn scan(&self, images: &[ImageInfo]) -> ScanOutcome {
        let ticket = self.session.begin();
        let detected = self.detect(images).await;

        if !self.session.is_current(ticket) {
            tracing::info!("scan superseded by a newer one, dropping result");
            return ScanOutcome::Superseded;
        }

        match detected {
            Ok(ingredients) if ingredients.is_empty() => ScanOutcome::NoIngredients,
            Ok(ingredients) => {
                let ingredients: Vec<String> = ingredients.into_iter().collect();
                let suggestions = self.suggest(&ingredients);
                tracing::info!(
                    ingredients = ingredients.len(),
                    suggestions = suggestions.len(),
                    "scan finished"
                );
                ScanOutcome::Found {
                    ingredients,
                    suggestions,
                }
            }
            Err(e) => {
                tracing::error!("scan failed: {}", e);
                ScanOutcome::Failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_superseded() {
        let session = ScanSession::new();
        let first = session.begin();
        assert!(session.is_current(first));

        let second = session.begin();
        assert!(!session.is_current(first));
        assert!(session.is_current(second));
    }

    #[test]
    fn test_offers_retake() {
        assert!(ScanOutcome::NoIngredients.offers_retake());
        assert!(ScanOutcome::Failed(MiamzError::MissingApiKey).offers_retake());
        assert!(ScanOutcome::Failed(MiamzError::Http("timeout".into())).offers_retake());
        assert!(!ScanOutcome::Failed(MiamzError::ImageLoad("corrompue".into())).offers_retake());
        assert!(!ScanOutcome::Superseded.offers_retake());

        let found = ScanOutcome::Found {
            ingredients: vec!["tomate".into()],
            suggestions: Vec::new(),
        };
        assert!(!found.offers_retake());
    }
}
