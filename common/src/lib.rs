//! MIAMZ Common Library
//!
//! 食材抽出・レシピ照合の純粋ロジックと共有型（I/OはCLI側）

pub mod types;
pub mod tables;
pub mod error;
pub mod extractor;
pub mod matcher;
pub mod catalog;

pub use types::{
    AnnotateImageResponse, Difficulty, Label, LabelAnnotation, LabelSource,
    LocalizedObjectAnnotation, Nutrition, Recipe, ServiceStatus, VisionResponse,
};
pub use tables::IngredientTables;
pub use error::{Error, Result};
pub use extractor::{extract_ingredients, DEFAULT_CONFIDENCE_THRESHOLD};
pub use matcher::{
    bookmarked, filter_by_category, match_recipes, required_matches, search_by_text,
    MatchRules, RecipeMatch, ALL_CATEGORIES, DEFAULT_MIN_OVERLAP,
};
pub use catalog::RecipeCatalog;
