//! 食材キーワード・翻訳テーブル
//!
//! Vision APIのラベル（英語）を食材として判定するキーワード一覧と、
//! 表示言語（フランス語）への翻訳辞書。起動時に一度だけ構築し、
//! 以後は不変の値として抽出処理に渡す。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// キーワード＋翻訳テーブル
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientTables {
    /// 食材判定キーワード（小文字）
    #[serde(default)]
    pub keywords: Vec<String>,
    /// 原語 → 表示語
    #[serde(default)]
    pub translations: HashMap<String, String>,
}

impl IngredientTables {
    /// 組み込みプリセットを取得
    pub fn from_preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "fr" | "french" | "français" => Some(Self::french_preset()),
            _ => None,
        }
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let tables: Self = serde_json::from_str(json)?;
        Ok(tables.normalized())
    }

    /// キーワードとキーを小文字化し、空キーワードを除外
    ///
    /// 空文字のキーワードは双方向部分一致で全ラベルに一致してしまうため残さない。
    pub fn normalized(self) -> Self {
        let mut keywords: Vec<String> = Vec::with_capacity(self.keywords.len());
        for keyword in self.keywords {
            let k = keyword.trim().to_lowercase();
            if !k.is_empty() && !keywords.contains(&k) {
                keywords.push(k);
            }
        }

        let translations = self
            .translations
            .into_iter()
            .map(|(k, v)| (k.trim().to_lowercase(), v))
            .filter(|(k, v)| !k.is_empty() && !v.trim().is_empty())
            .collect();

        Self { keywords, translations }
    }

    /// テーブルが使える状態か検証
    pub fn validate(&self) -> Result<()> {
        if self.keywords.is_empty() {
            return Err(Error::Config("食材キーワードが空です".into()));
        }
        Ok(())
    }

    /// 小文字化済みラベルが食材キーワードに一致するか（双方向部分一致）
    pub fn is_food(&self, label: &str) -> bool {
        self.matching_keyword(label).is_some()
    }

    /// 最初に一致したキーワード
    pub fn matching_keyword(&self, label: &str) -> Option<&str> {
        self.keywords
            .iter()
            .find(|k| label.contains(k.as_str()) || k.contains(label))
            .map(|k| k.as_str())
    }

    /// 完全一致で翻訳（未登録はそのまま返す）
    pub fn translate(&self, term: &str) -> String {
        self.translations
            .get(term)
            .cloned()
            .unwrap_or_else(|| term.to_string())
    }

    /// 設定をマージ（後から追加した設定が優先）
    pub fn merge(&mut self, other: &IngredientTables) {
        for keyword in &other.keywords {
            if !self.keywords.contains(keyword) {
                self.keywords.push(keyword.clone());
            }
        }
        self.translations.extend(other.translations.clone());
    }

    /// フランス語表示用プリセット
    fn french_preset() -> Self {
        let keywords = FRENCH_KEYWORDS.iter().map(|k| k.to_string()).collect();
        let translations = FRENCH_TRANSLATIONS
            .iter()
            .map(|(en, fr)| (en.to_string(), fr.to_string()))
            .collect();
        Self { keywords, translations }
    }
}

/// 食材キーワード（英語ラベル＋フランス語ラベルの両方を受け付ける）
const FRENCH_KEYWORDS: &[&str] = &[
    // 果物
    "apple", "banana", "orange", "lemon", "lime", "strawberry", "grape", "cherry",
    "peach", "pear", "plum", "kiwi", "mango", "pineapple", "watermelon", "melon",
    "avocado", "tomato", "berry", "fruit",
    // 野菜
    "carrot", "broccoli", "lettuce", "spinach", "cabbage", "onion", "garlic",
    "potato", "sweet potato", "bell pepper", "pepper", "cucumber", "zucchini",
    "eggplant", "mushroom", "corn", "peas", "beans", "celery", "radish",
    "vegetable", "salad", "greens",
    // タンパク質
    "chicken", "beef", "pork", "fish", "salmon", "tuna", "shrimp", "egg",
    "meat", "poultry", "seafood", "protein",
    // 乳製品
    "milk", "cheese", "yogurt", "butter", "cream", "dairy",
    // 穀物
    "bread", "rice", "pasta", "noodles", "cereal", "oats", "quinoa",
    "flour", "grain", "wheat",
    // その他
    "food", "ingredient", "cooking", "kitchen", "meal", "dish",
    "sauce", "oil", "vinegar", "spice", "herb", "seasoning",
    "nuts", "seeds", "honey", "sugar", "salt",
    // フランス語ラベル
    "pomme", "banane", "citron", "fraise", "raisin", "cerise",
    "pêche", "poire", "mangue", "ananas", "pastèque",
    "avocat", "tomate", "légume", "carotte", "brocoli",
    "laitue", "épinard", "chou", "oignon", "ail", "pomme de terre",
    "poivron", "concombre", "courgette", "aubergine", "champignon",
    "maïs", "petits pois", "haricots", "céleri", "radis", "salade",
    "poulet", "bœuf", "porc", "poisson", "saumon", "thon", "crevette",
    "œuf", "viande", "volaille", "fruits de mer", "protéine",
    "lait", "fromage", "yaourt", "beurre", "crème", "produit laitier",
    "pain", "riz", "pâtes", "nouilles", "céréales", "avoine",
    "farine", "blé", "nourriture", "ingrédient", "cuisine",
    "repas", "plat", "huile", "vinaigre", "épice", "herbe",
    "assaisonnement", "noix", "graines", "miel", "sucre", "sel",
];

/// 英語 → フランス語
const FRENCH_TRANSLATIONS: &[(&str, &str)] = &[
    ("apple", "pomme"),
    ("banana", "banane"),
    ("orange", "orange"),
    ("lemon", "citron"),
    ("lime", "citron vert"),
    ("strawberry", "fraise"),
    ("grape", "raisin"),
    ("cherry", "cerise"),
    ("peach", "pêche"),
    ("pear", "poire"),
    ("kiwi", "kiwi"),
    ("mango", "mangue"),
    ("pineapple", "ananas"),
    ("watermelon", "pastèque"),
    ("melon", "melon"),
    ("avocado", "avocat"),
    ("tomato", "tomate"),
    ("fruit", "fruit"),
    ("carrot", "carotte"),
    ("broccoli", "brocoli"),
    ("lettuce", "laitue"),
    ("spinach", "épinard"),
    ("cabbage", "chou"),
    ("onion", "oignon"),
    ("garlic", "ail"),
    ("potato", "pomme de terre"),
    ("sweet potato", "patate douce"),
    ("bell pepper", "poivron"),
    ("pepper", "poivron"),
    ("cucumber", "concombre"),
    ("zucchini", "courgette"),
    ("eggplant", "aubergine"),
    ("mushroom", "champignon"),
    ("corn", "maïs"),
    ("peas", "petits pois"),
    ("beans", "haricots"),
    ("celery", "céleri"),
    ("radish", "radis"),
    ("vegetable", "légume"),
    ("salad", "salade"),
    ("greens", "légumes verts"),
    ("chicken", "poulet"),
    ("beef", "bœuf"),
    ("pork", "porc"),
    ("fish", "poisson"),
    ("salmon", "saumon"),
    ("tuna", "thon"),
    ("shrimp", "crevette"),
    ("egg", "œuf"),
    ("meat", "viande"),
    ("poultry", "volaille"),
    ("seafood", "fruits de mer"),
    ("protein", "protéine"),
    ("milk", "lait"),
    ("cheese", "fromage"),
    ("yogurt", "yaourt"),
    ("butter", "beurre"),
    ("cream", "crème"),
    ("dairy", "produit laitier"),
    ("bread", "pain"),
    ("rice", "riz"),
    ("pasta", "pâtes"),
    ("noodles", "nouilles"),
    ("cereal", "céréales"),
    ("oats", "avoine"),
    ("quinoa", "quinoa"),
    ("flour", "farine"),
    ("grain", "grain"),
    ("wheat", "blé"),
    ("food", "nourriture"),
    ("ingredient", "ingrédient"),
    ("cooking", "cuisine"),
    ("kitchen", "cuisine"),
    ("meal", "repas"),
    ("dish", "plat"),
    ("sauce", "sauce"),
    ("oil", "huile"),
    ("vinegar", "vinaigre"),
    ("spice", "épice"),
    ("herb", "herbe"),
    ("seasoning", "assaisonnement"),
    ("nuts", "noix"),
    ("seeds", "graines"),
    ("honey", "miel"),
    ("sugar", "sucre"),
    ("salt", "sel"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_french_preset() {
        let tables = IngredientTables::from_preset("fr").unwrap();
        assert!(tables.keywords.contains(&"tomato".to_string()));
        assert_eq!(tables.translate("tomato"), "tomate");
        assert_eq!(tables.translate("bell pepper"), "poivron");
        assert!(tables.validate().is_ok());
    }

    #[test]
    fn test_unknown_preset() {
        assert!(IngredientTables::from_preset("klingon").is_none());
    }

    #[test]
    fn test_translate_passthrough() {
        let tables = IngredientTables::from_preset("fr").unwrap();
        assert_eq!(tables.translate("tomatoes"), "tomatoes");
        // 食材キーワードだが訳語なし
        assert!(tables.is_food("plum"));
        assert_eq!(tables.translate("plum"), "plum");
        assert_eq!(tables.translate("berry"), "berry");
    }

    #[test]
    fn test_is_food_bidirectional() {
        let tables = IngredientTables {
            keywords: vec!["bell pepper".into(), "cheese".into()],
            ..Default::default()
        };
        // ラベルがキーワードの一部
        assert!(tables.is_food("pepper"));
        // キーワードがラベルの一部
        assert!(tables.is_food("cheddar cheese"));
        assert!(!tables.is_food("car"));
    }

    #[test]
    fn test_from_json_normalizes() {
        let json = r#"{
            "keywords": ["Tomato", "  ", "tomato", "Leek"],
            "translations": {"Leek": "poireau"}
        }"#;
        let tables = IngredientTables::from_json(json).unwrap();
        assert_eq!(tables.keywords, vec!["tomato".to_string(), "leek".to_string()]);
        assert_eq!(tables.translate("leek"), "poireau");
    }

    #[test]
    fn test_validate_empty() {
        let tables = IngredientTables::default();
        assert!(matches!(tables.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_merge_overrides_translation() {
        let mut base = IngredientTables::from_preset("fr").unwrap();
        let custom = IngredientTables::from_json(
            r#"{"keywords": ["leek"], "translations": {"pepper": "poivre"}}"#,
        )
        .unwrap();
        base.merge(&custom);

        assert!(base.is_food("leek"));
        assert_eq!(base.translate("pepper"), "poivre");
        assert_eq!(base.translate("bell pepper"), "poivron");
    }
}
