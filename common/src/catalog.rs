//! レシピカタログ
//!
//! 起動時に一度だけ読み込む静的データ。実行中に増減はしない。
//! ブックマークのみ画面側の状態としてその場で切り替える（永続化なし）。

use crate::error::{Error, Result};
use crate::types::Recipe;
use std::collections::HashSet;

const BUILTIN_RECIPES: &str = include_str!("../data/recipes.json");

/// レシピカタログ
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
}

impl RecipeCatalog {
    /// 組み込みカタログ
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_RECIPES)
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列（Recipe配列）から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let recipes: Vec<Recipe> = serde_json::from_str(json)?;
        Self::new(recipes)
    }

    /// ID重複を検証して構築
    pub fn new(recipes: Vec<Recipe>) -> Result<Self> {
        let mut seen = HashSet::new();
        for recipe in &recipes {
            if !seen.insert(recipe.id) {
                return Err(Error::DuplicateRecipeId(recipe.id));
            }
        }
        Ok(Self { recipes })
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// ブックマークを切り替え、切り替え後の状態を返す
    pub fn toggle_bookmark(&mut self, id: u32) -> Option<bool> {
        let recipe = self.recipes.iter_mut().find(|r| r.id == id)?;
        recipe.is_bookmarked = !recipe.is_bookmarked;
        Some(recipe.is_bookmarked)
    }

    /// カテゴリ一覧（出現順、重複なし）
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.recipes
            .iter()
            .map(|r| r.category.as_str())
            .filter(|c| !c.is_empty() && seen.insert(*c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = RecipeCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 12);
        assert!(catalog.get(1).unwrap().is_bookmarked);
        assert_eq!(
            catalog.categories(),
            vec!["Quick", "Lunch", "Breakfast", "Dinner", "Snacks"]
        );
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let json = r#"[
            {"id": 1, "title": "A", "ingredients": []},
            {"id": 1, "title": "B", "ingredients": []}
        ]"#;
        let err = RecipeCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, Error::DuplicateRecipeId(1)));
    }

    #[test]
    fn test_toggle_bookmark() {
        let mut catalog = RecipeCatalog::builtin().unwrap();
        assert_eq!(catalog.toggle_bookmark(5), Some(true));
        assert!(catalog.get(5).unwrap().is_bookmarked);
        assert_eq!(catalog.toggle_bookmark(5), Some(false));
        assert_eq!(catalog.toggle_bookmark(999), None);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipes.json");
        std::fs::write(&path, r#"[{"id": 42, "title": "Soupe", "ingredients": ["poireau"]}]"#).unwrap();

        let catalog = RecipeCatalog::from_file(&path).unwrap();
        assert_eq!(catalog.get(42).unwrap().title, "Soupe");
    }
}
