//! レシピ照合ロジック
//!
//! 手持ちの食材リストとレシピカタログを突き合わせ、
//! 材料の一致数が閾値を満たすレシピを一致数の多い順に返す。

use crate::types::Recipe;

/// 一致割合の下限のデフォルト
pub const DEFAULT_MIN_OVERLAP: f64 = 0.4;

/// カテゴリフィルタで全件を表す値
pub const ALL_CATEGORIES: &str = "All";

/// 照合ルール
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRules {
    /// レシピ材料のうち一致が必要な割合（0.0-1.0）
    pub min_overlap: f64,
    /// 双方に含まれていれば一致とみなす語（小文字）
    pub anchor_terms: Vec<String>,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            min_overlap: DEFAULT_MIN_OVERLAP,
            anchor_terms: Vec::new(),
        }
    }
}

impl MatchRules {
    pub fn new(min_overlap: f64) -> Self {
        Self {
            min_overlap,
            ..Default::default()
        }
    }

    /// よく表記ゆれする食材の共通語を追加
    ///
    /// "tomates cerises" と "1 tomate" のように、どちらも相手を含まない場合でも一致させる。
    pub fn with_default_anchors(mut self) -> Self {
        self.anchor_terms = DEFAULT_ANCHORS.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn with_anchors<I, S>(mut self, anchors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.anchor_terms = anchors
            .into_iter()
            .map(|a| a.as_ref().trim().to_lowercase())
            .filter(|a| !a.is_empty())
            .collect();
        self
    }

    /// 1レシピの一致状況を計算
    pub fn score<'a, S: AsRef<str>>(&self, recipe: &'a Recipe, available: &[S]) -> RecipeMatch<'a> {
        let available = normalize_all(available);
        self.score_normalized(recipe, &available)
    }

    /// 条件を満たすレシピを一致数の降順で返す（同数はカタログ順）
    pub fn rank<'a, S: AsRef<str>>(&self, available: &[S], catalog: &'a [Recipe]) -> Vec<RecipeMatch<'a>> {
        let available = normalize_all(available);

        let mut matches: Vec<RecipeMatch<'a>> = catalog
            .iter()
            .map(|recipe| self.score_normalized(recipe, &available))
            .filter(|m| m.match_count >= required_matches(m.recipe.ingredients.len(), self.min_overlap))
            .collect();

        // sort_by は安定ソート
        matches.sort_by(|a, b| b.match_count.cmp(&a.match_count));
        matches
    }

    /// `rank` の結果からレシピだけを取り出す
    pub fn match_recipes<'a, S: AsRef<str>>(&self, available: &[S], catalog: &'a [Recipe]) -> Vec<&'a Recipe> {
        self.rank(available, catalog)
            .into_iter()
            .map(|m| m.recipe)
            .collect()
    }

    fn score_normalized<'a>(&self, recipe: &'a Recipe, available: &[String]) -> RecipeMatch<'a> {
        let mut matched = Vec::new();
        let mut missing = Vec::new();

        for ingredient in &recipe.ingredients {
            let normalized = ingredient.to_lowercase();
            if self.ingredient_matches(&normalized, available) {
                matched.push(ingredient.as_str());
            } else {
                missing.push(ingredient.as_str());
            }
        }

        let total = recipe.ingredients.len();
        // 材料0件は不足なしとして扱う
        let fraction = if total == 0 {
            1.0
        } else {
            matched.len() as f64 / total as f64
        };

        RecipeMatch {
            recipe,
            match_count: matched.len(),
            fraction,
            matched,
            missing,
        }
    }

    fn ingredient_matches(&self, ingredient: &str, available: &[String]) -> bool {
        available.iter().any(|a| {
            a.contains(ingredient)
                || ingredient.contains(a.as_str())
                || self
                    .anchor_terms
                    .iter()
                    .any(|t| ingredient.contains(t.as_str()) && a.contains(t.as_str()))
        })
    }
}

const DEFAULT_ANCHORS: &[&str] = &["tomate", "laitue", "fromage", "œuf", "poulet"];

/// 1レシピ分の照合結果
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeMatch<'a> {
    pub recipe: &'a Recipe,
    /// 一致した材料（カタログの表記のまま）
    pub matched: Vec<&'a str>,
    /// 不足している材料
    pub missing: Vec<&'a str>,
    pub match_count: usize,
    /// match_count / 材料数（材料0件なら1.0）
    pub fraction: f64,
}

/// 材料数に対して必要な一致数（切り上げ）
pub fn required_matches(ingredient_count: usize, min_overlap: f64) -> usize {
    (ingredient_count as f64 * min_overlap).ceil() as usize
}

/// 手持ち食材でレシピを照合（表記ゆれ補正なし）
///
/// # Examples
/// ```
/// use miamz_common::{match_recipes, Recipe};
///
/// let a = Recipe { id: 1, ingredients: vec!["tomato".into(), "pasta".into(), "garlic".into(), "oil".into()], ..Default::default() };
/// let b = Recipe { id: 2, ingredients: vec!["lettuce".into(), "tomato".into(), "cucumber".into(), "carrot".into()], ..Default::default() };
/// let catalog = vec![a, b];
///
/// let found = match_recipes(&["tomato", "pasta"], &catalog, 0.5);
/// assert_eq!(found.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1]);
/// ```
pub fn match_recipes<'a, S: AsRef<str>>(
    available: &[S],
    catalog: &'a [Recipe],
    min_overlap: f64,
) -> Vec<&'a Recipe> {
    MatchRules::new(min_overlap).match_recipes(available, catalog)
}

/// カテゴリで絞り込み（"All" は全件）
pub fn filter_by_category<'a>(catalog: &'a [Recipe], category: &str) -> Vec<&'a Recipe> {
    if category == ALL_CATEGORIES {
        return catalog.iter().collect();
    }
    catalog.iter().filter(|r| r.category == category).collect()
}

/// タイトル・説明・材料・タグ・料理ジャンルを部分一致で検索（大文字小文字無視）
pub fn search_by_text<'a>(catalog: &'a [Recipe], query: &str) -> Vec<&'a Recipe> {
    let term = query.to_lowercase();
    let hit = |s: &str| s.to_lowercase().contains(&term);

    catalog
        .iter()
        .filter(|r| {
            hit(&r.title)
                || hit(&r.description)
                || r.ingredients.iter().any(|i| hit(i))
                || r.tags.iter().any(|t| hit(t))
                || hit(&r.cuisine)
        })
        .collect()
}

/// ブックマーク済みのレシピ
pub fn bookmarked(catalog: &[Recipe]) -> Vec<&Recipe> {
    catalog.iter().filter(|r| r.is_bookmarked).collect()
}

fn normalize_all<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.as_ref().trim().to_lowercase())
        .collect()
}
