mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use matplan_mealplan::Day;
use matplan_recipe::{RecipeCategory, RecipeFilter};

use crate::cli::plan::PlanArgs;

/// matplan - Weekly meal planning
#[derive(Parser)]
#[command(name = "matplan")]
#[command(about = "Weekly meal planning with shopping lists and recipe suggestions", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List or search the recipe catalog
    Catalog {
        /// Text matched against recipe and ingredient names
        #[arg(long)]
        search: Option<String>,

        /// Required tag, may be repeated
        #[arg(long = "tag")]
        tags: Vec<String>,

        #[arg(long)]
        category: Option<RecipeCategory>,

        /// Longest accepted prep time in minutes
        #[arg(long)]
        max_prep: Option<u32>,
    },
    /// Plan a week and print its ingredients, shopping list and suggestions
    Plan {
        /// Meal as DAY=RECIPE_ID, may be repeated
        #[arg(long = "meal", value_parser = cli::plan::parse_meal, required = true)]
        meals: Vec<(Day, String)>,

        /// Portions to shop for (overrides config file)
        #[arg(long)]
        portions: Option<u32>,

        /// Extra shopping list item, may be repeated
        #[arg(long = "item")]
        items: Vec<String>,

        /// List ingredients per recipe instead of summed totals
        #[arg(long)]
        per_recipe: bool,
    },
    /// Rank recipes by the ingredients you already have
    Pantry {
        #[arg(required = true)]
        ingredients: Vec<String>,
    },
    /// Show the first-run introduction once
    Onboarding {
        /// Show the introduction again next time
        #[arg(long)]
        reset: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = matplan::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    matplan::observability::init_observability(
        "matplan",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
        config.observability.json,
    )?;

    match cli.command {
        Commands::Catalog {
            search,
            tags,
            category,
            max_prep,
        } => {
            let filter = RecipeFilter {
                query: search,
                tags,
                category,
                max_prep_time: max_prep,
                ..RecipeFilter::default()
            };
            cli::catalog::list(config, filter).await
        }
        Commands::Plan {
            meals,
            portions,
            items,
            per_recipe,
        } => cli::plan::plan(
            config,
            PlanArgs {
                meals,
                portions,
                items,
                per_recipe,
            },
        ),
        Commands::Pantry { ingredients } => cli::pantry::rank(config, ingredients),
        Commands::Onboarding { reset } => cli::onboarding::show(config, reset),
    }
}
