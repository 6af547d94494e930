use crate::config::TrackerConfig;
use crate::error::Result;
use crate::models::{CardResponse, PriceLookup, UnavailableReason};
use crate::translator::CardIdTranslator;
use reqwest::Client;
use tracing::debug;

/// Anything that can put a market price on a local card ID
#[async_trait::async_trait]
pub trait PriceSource: Send + Sync {
    /// Look up a card's market price, keeping the reason when there is none
    async fn lookup_price(&self, card_id: &str) -> PriceLookup;

    /// Market price with every failure collapsed to 0.0
    async fn fetch_price(&self, card_id: &str) -> f64 {
        self.lookup_price(card_id).await.market_price()
    }
}

/// pokemontcg.io card price fetcher.
///
/// Issues exactly one request per lookup. It never retries and never returns an
/// error; pacing between calls is left to the caller.
pub struct PokemonTcgFetcher {
    client: Client,
    translator: CardIdTranslator,
    base_url: String,
    api_key: Option<String>,
    category_priority: Vec<String>,
}

impl PokemonTcgFetcher {
    /// Create a new fetcher instance
    pub fn new(config: &TrackerConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout()).build()?;
        Ok(Self::with_client(client, config))
    }

    /// Create a fetcher around an already configured HTTP client
    pub fn with_client(client: Client, config: &TrackerConfig) -> Self {
        Self {
            client,
            translator: CardIdTranslator::new(config.pricing.set_id_map.clone()),
            base_url: config.pricing.base_url.clone(),
            api_key: config.pricing.api_key.clone(),
            category_priority: config.pricing.category_priority.clone(),
        }
    }

    fn card_url(&self, remote_id: &str) -> String {
        format!("{}{}", self.base_url, remote_id)
    }

    async fn request_price(&self, remote_id: &str) -> PriceLookup {
        let mut request = self.client.get(self.card_url(remote_id));
        if let Some(key) = &self.api_key {
            request = request.header("X-Api-Key", key);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return PriceLookup::Unavailable(UnavailableReason::Transport(e.to_string())),
        };

        if !response.status().is_success() {
            return PriceLookup::Unavailable(UnavailableReason::HttpStatus(response.status().as_u16()));
        }

        let card: CardResponse = match response.json().await {
            Ok(card) => card,
            Err(e) => {
                return PriceLookup::Unavailable(UnavailableReason::MalformedBody(e.to_string()))
            }
        };

        match card.market_price(&self.category_priority) {
            Some(price) => PriceLookup::Resolved(price),
            None => PriceLookup::Unavailable(UnavailableReason::NoMarketPrice),
        }
    }
}

#[async_trait::async_trait]
impl PriceSource for PokemonTcgFetcher {
    async fn lookup_price(&self, card_id: &str) -> PriceLookup {
        let remote_id = match self.translator.translate(card_id) {
            Ok(id) => id.to_string(),
            Err(e) => return PriceLookup::Unavailable(UnavailableReason::InvalidCardId(e.to_string())),
        };

        debug!("Fetching price for {} as {}", card_id, remote_id);
        self.request_price(&remote_id).await
    }
}
