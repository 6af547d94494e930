//! EV Tracker
//!
//! Prices every card in a local inventory against the pokemontcg.io API, rolls the
//! pull-rate weighted prices up into a per-set expected value, and merges that daily
//! summary into a CSV history ledger.

pub mod calculator;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod inventory;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod runner;
pub mod translator;

pub use calculator::EvCalculator;
pub use config::TrackerConfig;
pub use error::{Result, TrackerError};
pub use fetcher::{PokemonTcgFetcher, PriceSource};
pub use ledger::{compute_and_merge, Ledger};
pub use models::*;
pub use runner::{EvTracker, RunOutcome, RunReport};
pub use translator::{CardIdError, CardIdTranslator, RemoteCardId};
