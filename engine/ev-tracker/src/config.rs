use crate::error::{Result, TrackerError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the EV tracker, built once at startup and handed to every component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Pricing API configuration
    pub pricing: PricingConfig,

    /// Inventory and history file locations
    pub files: FileConfig,

    /// Progress reporting
    pub progress: ProgressConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Card lookup endpoint; the remote card ID is appended verbatim
    pub base_url: String,

    /// API key environment variable name
    pub api_key_env: String,

    /// API key, if one was found in the environment
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Local set prefix -> API set prefix
    pub set_id_map: HashMap<String, String>,

    /// TCGplayer price categories, checked in order
    pub category_priority: Vec<String>,

    /// Delay after each card when running without an API key
    pub pacing_delay_ms: u64,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    /// Inventory CSV (card_id, set_name, pull_rate)
    pub inventory_path: PathBuf,

    /// EV history CSV (set_name, expected_value, date)
    pub history_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressConfig {
    /// Log a progress line every N cards
    pub log_every: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        let mut set_id_map = HashMap::new();
        set_id_map.insert("me01".to_string(), "me1".to_string());
        set_id_map.insert("me02".to_string(), "me2".to_string());
        set_id_map.insert("sv8pt5".to_string(), "sv8pt5".to_string());

        Self {
            pricing: PricingConfig {
                base_url: "https://api.pokemontcg.io/v2/cards/".to_string(),
                api_key_env: "TCG_API_KEY".to_string(),
                api_key: None,
                set_id_map,
                category_priority: vec![
                    "normal".to_string(),
                    "holofoil".to_string(),
                    "reverseHolofoil".to_string(),
                ],
                pacing_delay_ms: 100,
                request_timeout_secs: 30,
            },
            files: FileConfig {
                inventory_path: PathBuf::from("master_inventory.csv"),
                history_path: PathBuf::from("ev_history.csv"),
            },
            progress: ProgressConfig { log_every: 50 },
        }
    }
}

impl TrackerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        config.pricing.api_key = std::env::var(&config.pricing.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());

        if let Ok(url) = std::env::var("TCG_API_URL") {
            config.pricing.base_url = url;
        }

        if let Ok(path) = std::env::var("EV_INVENTORY_FILE") {
            config.files.inventory_path = PathBuf::from(path);
        }

        if let Ok(path) = std::env::var("EV_HISTORY_FILE") {
            config.files.history_path = PathBuf::from(path);
        }

        if let Ok(delay) = std::env::var("EV_PACING_MS") {
            config.pricing.pacing_delay_ms = delay.parse().unwrap_or(100);
        }

        if let Ok(every) = std::env::var("EV_PROGRESS_EVERY") {
            config.progress.log_every = every.parse().unwrap_or(50);
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the tracker cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.pricing.base_url.trim().is_empty() {
            return Err(TrackerError::invalid_config("pricing base URL is empty"));
        }
        if self.pricing.category_priority.is_empty() {
            return Err(TrackerError::invalid_config("no price categories configured"));
        }
        if self.progress.log_every == 0 {
            return Err(TrackerError::invalid_config("progress.log_every must be at least 1"));
        }
        Ok(())
    }

    /// Whether requests go out with an API key
    pub fn is_authenticated(&self) -> bool {
        self.pricing.api_key.is_some()
    }

    /// Delay to insert after each card, if any.
    ///
    /// Authenticated runs are not paced.
    pub fn pacing_delay(&self) -> Option<Duration> {
        if self.is_authenticated() || self.pricing.pacing_delay_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.pricing.pacing_delay_ms))
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.pricing.request_timeout_secs)
    }
}
