use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Read a numeric CSV cell, treating a blank cell as 0.0
fn blank_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// One line of the inventory CSV
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct InventoryRow {
    /// Local card ID, `<set prefix>-<number>`
    pub card_id: String,

    /// Set the card belongs to; the grouping key for EV
    pub set_name: String,

    /// Probability of pulling this card; blank counts as 0
    #[serde(deserialize_with = "blank_as_zero")]
    pub pull_rate: f64,
}

/// An inventory row joined with its fetched market price
#[derive(Debug, Clone, PartialEq)]
pub struct PricedRow {
    pub row: InventoryRow,
    pub price: f64,
}

impl PricedRow {
    pub fn new(row: InventoryRow, price: f64) -> Self {
        Self { row, price }
    }

    /// This card's share of its set's expected value
    pub fn ev_contribution(&self) -> f64 {
        self.price * self.row.pull_rate
    }
}

/// One line of the EV history ledger
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct EvRow {
    pub set_name: String,
    #[serde(deserialize_with = "blank_as_zero")]
    pub expected_value: f64,
    /// `YYYY-MM-DD`
    pub date: String,
}

/// Outcome of a single price lookup.
///
/// EV math only ever sees [`PriceLookup::market_price`], where an unavailable price
/// counts as zero.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceLookup {
    Resolved(f64),
    Unavailable(UnavailableReason),
}

#[derive(Debug, Clone, PartialEq)]
pub enum UnavailableReason {
    /// Card ID could not be translated
    InvalidCardId(String),
    /// Request failed before a response arrived
    Transport(String),
    /// API answered with a non-success status
    HttpStatus(u16),
    /// Body was not the expected JSON
    MalformedBody(String),
    /// No configured category carried a market price
    NoMarketPrice,
}

impl PriceLookup {
    /// Market price, or 0.0 when unavailable
    pub fn market_price(&self) -> f64 {
        match self {
            PriceLookup::Resolved(price) => *price,
            PriceLookup::Unavailable(_) => 0.0,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, PriceLookup::Resolved(_))
    }
}

/// pokemontcg.io `GET /v2/cards/{id}` response; only the price path is modelled
#[derive(Debug, Deserialize, Default)]
pub struct CardResponse {
    #[serde(default)]
    pub data: CardData,
}

#[derive(Debug, Deserialize, Default)]
pub struct CardData {
    #[serde(default)]
    pub tcgplayer: Option<TcgPlayerData>,
}

#[derive(Debug, Deserialize, Default)]
pub struct TcgPlayerData {
    #[serde(default)]
    pub prices: HashMap<String, CategoryPrices>,
}

/// Prices for one printing (normal, holofoil, ...)
#[derive(Debug, Deserialize, Default)]
pub struct CategoryPrices {
    #[serde(default)]
    pub market: Option<f64>,
}

impl CardResponse {
    /// First truthy `market` price across `categories`, in order.
    ///
    /// A present category with a missing or zero market price falls through to the
    /// next category.
    pub fn market_price<S: AsRef<str>>(&self, categories: &[S]) -> Option<f64> {
        let prices = &self.data.tcgplayer.as_ref()?.prices;

        categories
            .iter()
            .filter_map(|category| prices.get(category.as_ref()))
            .filter_map(|category| category.market)
            .find(|market| *market != 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATEGORIES: [&str; 3] = ["normal", "holofoil", "reverseHolofoil"];

    fn parse(json: &str) -> CardResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_absent_category_is_skipped() {
        let response = parse(r#"{"data":{"tcgplayer":{"prices":{"holofoil":{"market":12.5}}}}}"#);
        assert_eq!(response.market_price(&CATEGORIES), Some(12.5));
    }

    #[test]
    fn test_zero_market_falls_through() {
        let response = parse(
            r#"{"data":{"tcgplayer":{"prices":{
                "normal":{"market":0},
                "holofoil":{"market":8.0}
            }}}}"#,
        );
        assert_eq!(response.market_price(&CATEGORIES), Some(8.0));
    }

    #[test]
    fn test_null_market_falls_through() {
        let response = parse(
            r#"{"data":{"tcgplayer":{"prices":{
                "normal":{"low":0.1,"market":null},
                "reverseHolofoil":{"market":3.25}
            }}}}"#,
        );
        assert_eq!(response.market_price(&CATEGORIES), Some(3.25));
    }

    #[test]
    fn test_priority_order_wins() {
        let response = parse(
            r#"{"data":{"tcgplayer":{"prices":{
                "reverseHolofoil":{"market":1.0},
                "normal":{"market":2.0}
            }}}}"#,
        );
        assert_eq!(response.market_price(&CATEGORIES), Some(2.0));
    }

    #[test]
    fn test_missing_structure_yields_none() {
        assert_eq!(parse(r#"{}"#).market_price(&CATEGORIES), None);
        assert_eq!(parse(r#"{"data":{}}"#).market_price(&CATEGORIES), None);
        assert_eq!(parse(r#"{"data":{"tcgplayer":{}}}"#).market_price(&CATEGORIES), None);
        let unknown_only = parse(r#"{"data":{"tcgplayer":{"prices":{"1stEdition":{"market":99.0}}}}}"#);
        assert_eq!(unknown_only.market_price(&CATEGORIES), None);
    }

    #[test]
    fn test_string_market_is_malformed() {
        let result = serde_json::from_str::<CardResponse>(
            r#"{"data":{"tcgplayer":{"prices":{"normal":{"market":"8.0"}}}}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_lookup_sentinel() {
        assert_eq!(PriceLookup::Resolved(4.5).market_price(), 4.5);
        assert_eq!(PriceLookup::Unavailable(UnavailableReason::NoMarketPrice).market_price(), 0.0);
        assert!(!PriceLookup::Unavailable(UnavailableReason::HttpStatus(404)).is_resolved());
    }

    #[test]
    fn test_ev_contribution() {
        let row = InventoryRow {
            card_id: "me01-001".to_string(),
            set_name: "Base".to_string(),
            pull_rate: 0.25,
        };
        assert_eq!(PricedRow::new(row, 4.0).ev_contribution(), 1.0);
    }
}
