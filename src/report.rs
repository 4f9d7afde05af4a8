//! 結果の表示
//!
//! 「未検出」と「解析失敗」は別メッセージで出す（どちらも撮り直しを促す）。

use crate::error::Result;
use crate::scan::{ScanOutcome, Suggestion};
use chrono::{DateTime, Utc};
use miamz_common::Recipe;
use serde::Serialize;

pub const NO_FOOD_TITLE: &str = "Aucun aliment détecté";
pub const NO_FOOD_MESSAGE: &str = "Nous n'avons pas pu détecter d'aliments dans cette image. \
Assurez-vous que les aliments sont bien visibles et éclairés.";
pub const FAILED_TITLE: &str = "Erreur";
pub const FAILED_MESSAGE: &str = "Échec de l'analyse de l'image. Veuillez réessayer.";
pub const SUPERSEDED_MESSAGE: &str = "Analyse remplacée par une analyse plus récente.";

/// JSON出力用のスキャン結果
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport<'a> {
    pub status: &'static str,
    pub scanned_at: DateTime<Utc>,
    pub ingredients: &'a [String],
    pub suggestions: &'a [Suggestion],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// 撮り直しを促すか
    pub retake: bool,
}

impl<'a> ScanReport<'a> {
    pub fn from_outcome(outcome: &'a ScanOutcome) -> Self {
        let mut report = Self {
            status: "found",
            scanned_at: Utc::now(),
            ingredients: &[],
            suggestions: &[],
            error: None,
            retake: outcome.offers_retake(),
        };

        match outcome {
            ScanOutcome::Found {
                ingredients,
                suggestions,
            } => {
                report.ingredients = ingredients.as_slice();
                report.suggestions = suggestions.as_slice();
            }
            ScanOutcome::NoIngredients => report.status = "noIngredients",
            ScanOutcome::Failed(e) => {
                report.status = "failed";
                report.error = Some(e.to_string());
            }
            ScanOutcome::Superseded => report.status = "superseded",
        }

        report
    }
}

/// スキャン結果を出力
pub fn print_outcome(outcome: &ScanOutcome, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&ScanReport::from_outcome(outcome))?);
        return Ok(());
    }

    match outcome {
        ScanOutcome::Found {
            ingredients,
            suggestions,
        } => {
            println!("🍅 Aliments détectés !");
            println!("  Trouvé : {}\n", ingredients.join(", "));

            if suggestions.is_empty() {
                println!("Aucune recette ne correspond à ces ingrédients.");
            } else {
                println!("Recettes pour : {}", ingredients.join(", "));
                for s in suggestions {
                    println!("{}", format_suggestion(s));
                }
            }
        }
        ScanOutcome::NoIngredients => {
            println!("{}", NO_FOOD_TITLE);
            println!("  {}", NO_FOOD_MESSAGE);
        }
        ScanOutcome::Failed(e) if e.is_extraction_failure() => {
            println!("{}", FAILED_TITLE);
            println!("  {}", FAILED_MESSAGE);
            println!("  ({})", e);
        }
        ScanOutcome::Failed(e) => {
            println!("{} : {}", FAILED_TITLE, e);
        }
        ScanOutcome::Superseded => {
            println!("{}", SUPERSEDED_MESSAGE);
        }
    }

    Ok(())
}

/// 提案レシピ1件（一致数/材料数と不足材料）
pub fn format_suggestion(s: &Suggestion) -> String {
    let mut line = format!(
        "  {} ({}/{})",
        format_recipe_line(&s.recipe),
        s.match_count,
        s.recipe.ingredients.len()
    );
    if !s.missing.is_empty() {
        line.push_str(&format!("\n      manque : {}", s.missing.join(", ")));
    }
    line
}

/// レシピ1行表示
pub fn format_recipe_line(recipe: &Recipe) -> String {
    let mark = if recipe.is_bookmarked { "♥" } else { " " };
    format!(
        "{} #{} {} · {} · {} · ★{:.1}",
        mark, recipe.id, recipe.title, recipe.time, recipe.difficulty, recipe.rating
    )
}
