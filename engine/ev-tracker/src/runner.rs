use crate::config::TrackerConfig;
use crate::error::Result;
use crate::fetcher::{PokemonTcgFetcher, PriceSource};
use crate::inventory::load_inventory;
use crate::ledger::{compute_and_merge, Ledger};
use crate::models::{InventoryRow, PricedRow};
use serde::Serialize;
use std::path::PathBuf;
use tokio::time::sleep;
use tracing::{debug, info};

/// Counters for a finished run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub run_date: String,
    pub cards_processed: usize,
    pub cards_priced: usize,
    pub cards_unavailable: usize,
    pub summary_rows: usize,
    pub ledger_rows: usize,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Inventory file absent; nothing was fetched or written
    InventoryMissing(PathBuf),
    Completed(RunReport),
}

/// Prices the inventory one card at a time and updates the EV ledger
pub struct EvTracker<S: PriceSource> {
    config: TrackerConfig,
    source: S,
}

impl EvTracker<PokemonTcgFetcher> {
    /// Create a tracker backed by the pokemontcg.io API
    pub fn from_config(config: TrackerConfig) -> Result<Self> {
        let source = PokemonTcgFetcher::new(&config)?;
        Ok(Self::new(config, source))
    }
}

impl<S: PriceSource> EvTracker<S> {
    pub fn new(config: TrackerConfig, source: S) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Run a full fetch, summarize and merge cycle for `run_date` (`YYYY-MM-DD`)
    pub async fn run(&self, run_date: &str) -> Result<RunOutcome> {
        let inventory_path = &self.config.files.inventory_path;
        if !inventory_path.exists() {
            return Ok(RunOutcome::InventoryMissing(inventory_path.clone()));
        }

        let inventory = load_inventory(inventory_path)?;
        let priced = self.price_inventory(inventory).await;

        let cards_priced = priced.iter().filter(|p| p.price != 0.0).count();
        let existing = Ledger::load(&self.config.files.history_path)?;
        let ledger = compute_and_merge(&priced, existing, run_date);
        ledger.save(&self.config.files.history_path)?;

        let report = RunReport {
            run_date: run_date.to_string(),
            cards_processed: priced.len(),
            cards_priced,
            cards_unavailable: priced.len() - cards_priced,
            summary_rows: ledger.rows_for_date(run_date).count(),
            ledger_rows: ledger.len(),
        };
        info!("Run completed: {:?}", report);

        Ok(RunOutcome::Completed(report))
    }

    /// Fetch prices sequentially in inventory order.
    ///
    /// Unauthenticated runs sleep after every card. A card that cannot be priced
    /// gets 0 and never stops the loop.
    pub async fn price_inventory(&self, inventory: Vec<InventoryRow>) -> Vec<PricedRow> {
        let total = inventory.len();
        let pacing = self.config.pacing_delay();
        let log_every = self.config.progress.log_every.max(1);

        info!("Fetching market prices for {} cards...", total);
        if let Some(delay) = pacing {
            info!("No API key configured, pacing requests at {:?} per card", delay);
        }

        let mut priced = Vec::with_capacity(total);
        for (idx, row) in inventory.into_iter().enumerate() {
            let lookup = self.source.lookup_price(&row.card_id).await;
            if !lookup.is_resolved() {
                debug!("No market price for {}: {:?}", row.card_id, lookup);
            }
            priced.push(PricedRow::new(row, lookup.market_price()));

            if (idx + 1) % log_every == 0 {
                info!("Progress: {}/{} cards...", idx + 1, total);
            }

            if let Some(delay) = pacing {
                sleep(delay).await;
            }
        }

        priced
    }
}
