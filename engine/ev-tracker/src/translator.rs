//! Local card ID -> pokemontcg.io card ID translation

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Reasons a local card ID cannot be translated
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CardIdError {
    #[error("card ID '{0}' has no '-' separator")]
    MissingSeparator(String),

    #[error("card ID '{0}' has more than one '-' separator")]
    TooManyParts(String),

    #[error("card ID '{0}' has a non-numeric card number")]
    InvalidNumber(String),
}

/// Card identifier in the API's scheme, e.g. `me1-7`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCardId {
    pub set_prefix: String,
    pub number: u64,
}

impl fmt::Display for RemoteCardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.set_prefix, self.number)
    }
}

/// Maps local `<prefix>-<number>` IDs onto the API's set prefixes and integer numbering
#[derive(Debug, Clone)]
pub struct CardIdTranslator {
    set_id_map: HashMap<String, String>,
}

impl CardIdTranslator {
    pub fn new(set_id_map: HashMap<String, String>) -> Self {
        Self { set_id_map }
    }

    /// Translate a local card ID.
    ///
    /// Unknown prefixes pass through unchanged. The number loses its leading zeros,
    /// so `me01-007` becomes `me1-7`.
    pub fn translate(&self, card_id: &str) -> Result<RemoteCardId, CardIdError> {
        let mut parts = card_id.split('-');
        let (prefix, number) = match (parts.next(), parts.next(), parts.next()) {
            (Some(prefix), Some(number), None) => (prefix, number),
            (_, None, _) => return Err(CardIdError::MissingSeparator(card_id.to_string())),
            _ => return Err(CardIdError::TooManyParts(card_id.to_string())),
        };

        let number: u64 = number
            .trim()
            .parse()
            .map_err(|_| CardIdError::InvalidNumber(card_id.to_string()))?;

        let set_prefix = self.set_id_map.get(prefix).cloned().unwrap_or_else(|| prefix.to_string());

        Ok(RemoteCardId { set_prefix, number })
    }
}
