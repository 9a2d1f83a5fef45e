//! Command-line front end: collect preferences from flags, plan over a
//! local dataset and print the matches (or why nothing matched).

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use recipe_planner::{
    plan_from, CaloricPhase, CatalogProvider, LocalCatalog, MealPlan, PreferenceSet,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "recipe-plan", version, about = "Recommend recipes matching your preferences")]
struct Cli {
    /// Dataset to load: a .json/.yaml file or a directory of them
    #[arg(short, long, env = "RECIPE_CATALOG")]
    catalog: Utf8PathBuf,

    /// Ingredient the recipe should contain (repeatable)
    #[arg(short, long = "ingredient")]
    ingredients: Vec<String>,

    /// Allergen or diet tag to avoid (repeatable)
    #[arg(short, long = "exclude")]
    excluded: Vec<String>,

    /// Caloric phase: low, medium or high
    #[arg(short, long)]
    phase: Option<CaloricPhase>,

    /// Print the plan as JSON
    #[arg(long)]
    json: bool,

    /// Show numbered preparation steps for each match
    #[arg(long)]
    steps: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let prefs = PreferenceSet::builder()
        .include_all(cli.ingredients)
        .exclude_all(cli.excluded)
        .maybe_phase(cli.phase)
        .build();

    let catalog = LocalCatalog::new(cli.catalog);
    info!("Planning from {}", catalog.describe());
    let result = plan_from(&catalog, &prefs);

    if cli.json {
        let out = serde_json::to_string_pretty(&result).context("Failed to serialize plan")?;
        println!("{out}");
    } else {
        print_plan(&result, cli.steps);
    }

    Ok(())
}

fn print_plan(result: &MealPlan, with_steps: bool) {
    if let Some(explanation) = &result.explanation {
        println!("{explanation}");
        return;
    }

    for recipe in &result.recipes {
        let calories = recipe
            .calories
            .map(|c| format!(", {c} kcal"))
            .unwrap_or_default();
        println!(
            "#{} {} ({} min, serves {}{})",
            recipe.id, recipe.title, recipe.ready_in_minutes, recipe.servings, calories
        );
        if with_steps {
            for step in recipe.steps() {
                println!("   {}. {}", step.number, step.instruction);
            }
        }
    }
}
