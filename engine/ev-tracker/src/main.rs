use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use ev_tracker::logging::initialize_logging;
use ev_tracker::{EvTracker, RunOutcome, TrackerConfig};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "ev-tracker")]
#[command(about = "Price the card inventory and append today's per-set EV to the history ledger")]
#[command(version)]
struct Cli {
    /// Inventory CSV (card_id, set_name, pull_rate)
    #[arg(short, long)]
    inventory: Option<PathBuf>,

    /// EV history CSV to update
    #[arg(long)]
    history: Option<PathBuf>,

    /// Run date (YYYY-MM-DD); defaults to today
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Card lookup endpoint base URL
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    initialize_logging("info")?;

    let mut config = TrackerConfig::from_env().context("Failed to load configuration")?;
    if let Some(path) = cli.inventory {
        config.files.inventory_path = path;
    }
    if let Some(path) = cli.history {
        config.files.history_path = path;
    }
    if let Some(url) = cli.api_url {
        config.pricing.base_url = url;
    }
    config.validate()?;
    info!("Loaded configuration: {:?}", config.files);
    info!("API key configured: {}", config.is_authenticated());

    let run_date = cli.date.unwrap_or_else(|| Local::now().date_naive()).format("%Y-%m-%d").to_string();

    let tracker = EvTracker::from_config(config).context("Failed to create price fetcher")?;
    match tracker.run(&run_date).await.context("EV update failed")? {
        RunOutcome::InventoryMissing(path) => {
            println!("Error: {} not found.", path.display());
        }
        RunOutcome::Completed(_) => {
            println!("Success. EV History updated for {run_date}.");
        }
    }

    Ok(())
}
