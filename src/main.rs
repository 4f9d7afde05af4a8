use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use miamz::{cache, cli, config, error, report, retake, scan, scanner, vision};
use cli::{Cli, Commands};
use config::Config;
use error::{MiamzError, Result};
use miamz_common::{extract_ingredients, filter_by_category, search_by_text, MatchRules, VisionResponse};
use scan::{ScanOutcome, ScanPipeline, ScanSettings, Suggestion};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Scan { path, threshold, min_overlap, anchors, use_cache, json, interactive } => {
            let config = with_overrides(config, threshold, min_overlap)?;
            run_scan(&config, path, anchors, use_cache, json, interactive).await?;
        }

        Commands::Extract { input, threshold } => {
            let config = with_overrides(config, threshold, None)?;
            if !input.exists() {
                return Err(MiamzError::FileNotFound(input.display().to_string()));
            }

            let content = std::fs::read_to_string(&input)?;
            let response: VisionResponse = serde_json::from_str(&content)
                .map_err(|e| MiamzError::MalformedResponse(e.to_string()))?;
            let tables = config.load_tables()?;
            let found = extract_ingredients(&response, &tables, config.confidence_threshold)?;

            if found.is_empty() {
                println!("{}", report::NO_FOOD_TITLE);
            } else {
                for ingredient in &found {
                    println!("- {}", ingredient);
                }
            }
        }

        Commands::Match { ingredients, min_overlap, anchors, json } => {
            let config = with_overrides(config, None, min_overlap)?;
            let catalog = config.load_catalog()?;
            let rules = match_rules(config.min_overlap, anchors);
            let ingredients = cli::non_blank_ingredients(ingredients);

            let suggestions: Vec<Suggestion> = rules
                .rank(&ingredients, catalog.recipes())
                .into_iter()
                .map(Suggestion::from)
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&suggestions)?);
            } else if suggestions.is_empty() {
                println!("Aucune recette ne correspond à ces ingrédients.");
            } else {
                println!("Recettes pour : {}", ingredients.join(", "));
                for s in &suggestions {
                    println!("{}", report::format_suggestion(s));
                }
            }
        }

        Commands::Recipes { category, search, bookmarked } => {
            let catalog = config.load_catalog()?;
            let mut recipes = filter_by_category(catalog.recipes(), &category);

            if let Some(query) = search {
                let hits: HashSet<u32> = search_by_text(catalog.recipes(), &query)
                    .iter()
                    .map(|r| r.id)
                    .collect();
                recipes.retain(|r| hits.contains(&r.id));
            }

            if bookmarked {
                recipes.retain(|r| r.is_bookmarked);
            }

            if recipes.is_empty() {
                println!("Aucune recette trouvée. Essayez une autre recherche ou catégorie.");
            } else {
                println!("{} recette(s)", recipes.len());
                for recipe in recipes {
                    println!("{}", report::format_recipe_line(recipe));
                }
            }
        }

        Commands::Config { set_api_key, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ Clé API enregistrée");
            }

            if show {
                println!("Configuration :");
                println!("  Endpoint : {}", config.endpoint);
                println!("  Seuil de confiance : {}", config.confidence_threshold);
                println!("  Recouvrement minimal : {}", config.min_overlap);
                println!("  Résultats max : {}", config.max_results);
                println!("  Taille max image : {}px", config.max_image_size);
                println!("  Langue : {}", config.language);
                println!("  Clé API : {}", if config.get_api_key().is_ok() { "configurée" } else { "non configurée" });
            }
        }

        Commands::Cache { clear, folder, info } => {
            let target = folder.unwrap_or_else(|| PathBuf::from("."));
            let cache_path = cache::CacheFile::cache_path(&target);

            if info || !clear {
                if cache_path.exists() {
                    let cache = cache::CacheFile::load(&target);
                    println!("Cache :");
                    println!("  Chemin : {}", cache_path.display());
                    println!("  Entrées : {}", cache.len());
                    if let Ok(meta) = std::fs::metadata(&cache_path) {
                        println!("  Taille : {} octets", meta.len());
                    }
                } else {
                    println!("Aucun cache : {}", cache_path.display());
                }
            }

            if clear {
                match cache::CacheFile::clear(&target) {
                    Ok(true) => println!("✔ Cache supprimé : {}", cache_path.display()),
                    Ok(false) => println!("Aucun cache à supprimer"),
                    Err(e) => println!("Erreur de suppression du cache : {}", e),
                }
            }
        }
    }

    Ok(())
}

async fn run_scan(
    config: &Config,
    path: PathBuf,
    anchors: bool,
    use_cache: bool,
    json: bool,
    interactive: bool,
) -> Result<()> {
    // 未設定でも続行し、スキャン結果（解析失敗）として知らせる
    let api_key = config.get_api_key().unwrap_or_default();
    let poster = vision::ReqwestPoster::new(config.timeout_seconds)?;
    let client = vision::VisionClient::new(poster, api_key, config.endpoint.clone(), config.max_results);

    let settings = ScanSettings {
        confidence_threshold: config.confidence_threshold,
        rules: match_rules(config.min_overlap, anchors),
        max_image_size: config.max_image_size,
        use_cache,
    };
    let pipeline = ScanPipeline::new(client, config.load_tables()?, config.load_catalog()?, settings);

    let mut target = path;
    loop {
        let images = scanner::scan_path(&target)?;
        if images.is_empty() {
            return Err(MiamzError::NoImagesFound(target.display().to_string()));
        }

        if !json {
            println!("📸 miamz - Analyse de {} photo(s)\n", images.len());
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message("Analyse...");
        spinner.enable_steady_tick(Duration::from_millis(100));

        let outcome = pipeline.scan(&images).await;
        spinner.finish_and_clear();

        report::print_outcome(&outcome, json)?;

        if !(interactive && outcome.offers_retake()) {
            if let ScanOutcome::Failed(e) = outcome {
                return Err(e);
            }
            return Ok(());
        }

        match retake::prompt_retake()? {
            retake::RetakeAction::Retake(next) => target = next,
            retake::RetakeAction::Again => {}
            retake::RetakeAction::Quit => return Ok(()),
        }
    }
}

fn with_overrides(mut config: Config, threshold: Option<f32>, min_overlap: Option<f64>) -> Result<Config> {
    if let Some(t) = threshold {
        config.confidence_threshold = t;
    }
    if let Some(m) = min_overlap {
        config.min_overlap = m;
    }
    config.validate()?;
    Ok(config)
}

fn match_rules(min_overlap: f64, anchors: bool) -> MatchRules {
    let rules = MatchRules::new(min_overlap);
    if anchors {
        rules.with_default_anchors()
    } else {
        rules
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "miamz=debug,miamz_common=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
