//! Command-line front end for the nutrition tracker.
//!
//! ```bash
//! nutrition-cli search chicken
//! nutrition-cli add 1 --servings 1.5
//! nutrition-cli log
//! nutrition-cli remove 1714550709250
//! nutrition-cli bmr --age 25 --weight 70 --height 175 --gender male --activity moderate
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use nutrition_tracker::{
    app,
    catalog::{Catalog, NormalizedFood},
    client::ApiClient,
    config::AppConfig,
    energy::CalculateBmrRequest,
    food_log::{display, parse_servings, FoodLog, FOOD_LOG_KEY},
    storage::{FileStore, KeyValueStore},
};

#[derive(Parser)]
#[command(name = "nutrition-cli", about = "Search foods, keep a food log, estimate energy needs")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory holding the food log (overrides FOOD_LOG_DIR)
    #[arg(long, global = true)]
    store_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Find catalog foods by name
    Search { term: String },
    /// Log servings of a catalog food
    Add {
        food_id: i64,
        /// Non-numeric values count as one serving
        #[arg(long, short = 's', allow_hyphen_values = true)]
        servings: Option<String>,
    },
    /// Remove a log entry by its id
    Remove { entry_id: i64 },
    /// Show every log entry and the totals
    Log,
    /// Show nutrient totals
    Totals,
    /// Estimate BMR and TDEE via the API
    Bmr {
        #[arg(long)]
        age: f64,
        #[arg(long)]
        weight: f64,
        #[arg(long)]
        height: f64,
        #[arg(long, default_value = "male")]
        gender: String,
        #[arg(long, default_value = "sedentary")]
        activity: String,
    },
    /// Check that the API is reachable
    Ping,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let filter = if cli.verbose {
        "nutrition_tracker=debug"
    } else {
        "nutrition_tracker=warn"
    };
    app::init_tracing(filter, true);

    let config = AppConfig::from_env()?;
    let store_dir = cli.store_dir.unwrap_or_else(|| config.food_log_dir.clone());
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(store_dir));

    match cli.command {
        Command::Search { term } => {
            let catalog = Catalog::from_env_path(config.catalog_path.as_deref())?;
            let found = catalog.search(&term);
            if found.is_empty() {
                println!("No foods found. Try \"chicken\", \"egg\", \"rice\"");
            }
            for food in found {
                println!("{}", display::format_food(food));
            }
        }
        Command::Add { food_id, servings } => {
            let catalog = Catalog::from_env_path(config.catalog_path.as_deref())?;
            let food = catalog
                .get(food_id)
                .with_context(|| format!("food {food_id} not found in catalog"))?;
            let mut log = FoodLog::load(store, FOOD_LOG_KEY).await;
            let entry = log
                .add_entry(&NormalizedFood::from(food), parse_servings(servings.as_deref()))
                .await
                .context("save food log")?;
            println!(
                "Added {} of {}",
                display::servings_label(entry.servings),
                entry.name
            );
            println!("{}", display::format_entry(&entry));
        }
        Command::Remove { entry_id } => {
            let mut log = FoodLog::load(store, FOOD_LOG_KEY).await;
            if log.remove_entry(entry_id).await.context("save food log")? {
                println!("Food removed from log");
            } else {
                println!("No log entry with id {entry_id}");
            }
        }
        Command::Log => {
            let log = FoodLog::load(store, FOOD_LOG_KEY).await;
            if log.is_empty() {
                println!("No foods logged yet.");
            }
            for entry in log.entries() {
                println!("{}", display::format_entry(entry));
            }
            println!("{}", display::format_totals(&log.totals()));
        }
        Command::Totals => {
            let log = FoodLog::load(store, FOOD_LOG_KEY).await;
            println!("{}", display::format_totals(&log.totals()));
        }
        Command::Bmr {
            age,
            weight,
            height,
            gender,
            activity,
        } => {
            let api = ApiClient::new(&config.client)?;
            let req = CalculateBmrRequest {
                age: Some(age),
                weight: Some(weight),
                height: Some(height),
                gender: Some(gender),
                activity: Some(activity),
            };
            let est = api.calculate_bmr(&req).await.with_context(|| {
                format!("is the server running at {}?", config.client.api_base_url)
            })?;
            println!("BMR:         {} kcal", est.bmr);
            println!("Maintenance: {} kcal", est.maintenance);
            println!("Mild loss:   {} kcal", est.mild_loss);
            println!("Weight loss: {} kcal", est.weight_loss);
            println!("Weight gain: {} kcal", est.weight_gain);
        }
        Command::Ping => {
            let api = ApiClient::new(&config.client)?;
            let health = api.health().await?;
            println!("{} ({})", health.message, health.timestamp);
        }
    }
    Ok(())
}
