//! Price observations - the raw records of a price feed

use serde::{Deserialize, Serialize};

use crate::error::{PriceBookError, Result};
use crate::types::{CurrencyCode, Price, Timestamp};

/// A single timestamped unit-price record for one currency.
///
/// Matches the conventional feed shape: a JSON object bearing a `currency`
/// token, a numeric `price` and an RFC 3339 `date` string.
///
/// # Example
/// ```
/// use pricebook::observation::PriceObservation;
///
/// let record = r#"{"currency":"BLUR","date":"2023-08-29T07:10:40.000Z","price":0.20811525}"#;
/// let obs: PriceObservation = serde_json::from_str(record).unwrap();
/// assert_eq!(obs.currency, "BLUR");
/// assert!(obs.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    /// Currency identifier, case-sensitive as supplied
    pub currency: CurrencyCode,
    /// Unit price in the feed's reference unit
    pub price: Price,
    /// Observation time
    #[serde(rename = "date")]
    pub timestamp: Timestamp,
}

impl PriceObservation {
    /// Create a new observation
    pub fn new(currency: impl Into<CurrencyCode>, price: Price, timestamp: Timestamp) -> Self {
        Self {
            currency: currency.into(),
            price,
            timestamp,
        }
    }

    /// Defensive shape validation: the currency token must be non-empty and
    /// the price finite and non-negative.
    ///
    /// The feed layer rejects malformed records before they reach the index,
    /// so validated inputs can be reduced without further checks.
    pub fn validate(&self) -> Result<()> {
        if self.currency.is_empty() {
            return Err(PriceBookError::InvalidObservation(
                "empty currency identifier".to_string(),
            ));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(PriceBookError::InvalidObservation(format!(
                "price for {} must be finite and non-negative, got: {}",
                self.currency, self.price
            )));
        }
        Ok(())
    }
}
