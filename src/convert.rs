//! Cross-currency conversion over a latest-price index
//!
//! Conversion routes through the feed's reference unit: an amount times the
//! source unit price gives reference value, dividing by the target unit price
//! gives the target amount. No pairwise rate table is consulted.
//!
//! # Example
//! ```
//! use chrono::{TimeZone, Utc};
//! use pricebook::convert::{convert, ConversionQuery};
//! use pricebook::index::LatestPriceIndex;
//! use pricebook::observation::PriceObservation;
//!
//! let t1 = Utc.with_ymd_and_hms(2023, 8, 29, 7, 0, 0).unwrap();
//! let t2 = Utc.with_ymd_and_hms(2023, 8, 29, 8, 0, 0).unwrap();
//! let index = LatestPriceIndex::from_observations(vec![
//!     PriceObservation::new("A", 10.0, t1),
//!     PriceObservation::new("A", 12.0, t2),
//!     PriceObservation::new("B", 4.0, t1),
//! ]);
//!
//! // 6 * 12 / 4, with the later A observation in effect
//! let quote = convert(&index, &ConversionQuery::new("A", "B", 6.0)).unwrap();
//! assert_eq!(quote.target_amount, 18.0);
//! assert_eq!(quote.rate, 3.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{PriceBookError, Result};
use crate::index::LatestPriceIndex;
use crate::types::{Amount, CurrencyCode};

/// A conversion request: turn `amount` of `source` into `target`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionQuery {
    /// Currency the amount is denominated in
    pub source: CurrencyCode,
    /// Currency to convert into
    pub target: CurrencyCode,
    /// Amount to convert, must be finite and non-negative
    pub amount: Amount,
}

impl ConversionQuery {
    /// Create a new conversion query
    pub fn new(
        source: impl Into<CurrencyCode>,
        target: impl Into<CurrencyCode>,
        amount: Amount,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            amount,
        }
    }
}

/// A fulfilled conversion, carrying the applied rate alongside both amounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    /// Currency converted from
    pub source: CurrencyCode,
    /// Currency converted to
    pub target: CurrencyCode,
    /// Amount supplied, in the source currency
    pub source_amount: Amount,
    /// Rate applied, target units per source unit
    pub rate: f64,
    /// Amount produced, in the target currency
    pub target_amount: Amount,
}

/// Convert a query's amount using the latest prices in `index`.
///
/// Preconditions are checked in a fixed order and the first failure wins:
/// the amount must be finite and non-negative, the source currency must be
/// indexed, then the target, and the target's latest price must be strictly
/// positive. A query from a currency to itself passes the same checks and
/// then returns the amount untouched, so no rounding creeps in on the
/// identity path.
pub fn convert(index: &LatestPriceIndex, query: &ConversionQuery) -> Result<Conversion> {
    if !query.amount.is_finite() || query.amount < 0.0 {
        return Err(PriceBookError::InvalidAmount(query.amount));
    }

    let rate = index.cross_rate(&query.source, &query.target)?;

    let target_amount = if query.source == query.target {
        query.amount
    } else {
        query.amount * rate
    };

    Ok(Conversion {
        source: query.source.clone(),
        target: query.target.clone(),
        source_amount: query.amount,
        rate,
        target_amount,
    })
}

/// Convenience wrapper returning just the converted amount
pub fn convert_amount(
    index: &LatestPriceIndex,
    amount: Amount,
    source: &str,
    target: &str,
) -> Result<Amount> {
    convert(index, &ConversionQuery::new(source, target, amount)).map(|c| c.target_amount)
}

/// Convert a batch of `(amount, currency)` pairs into a common target.
///
/// Fails on the first pair that cannot be converted.
pub fn convert_amounts(
    index: &LatestPriceIndex,
    amounts: &[(Amount, CurrencyCode)],
    target: &str,
) -> Result<Vec<Amount>> {
    amounts
        .iter()
        .map(|(amount, source)| convert_amount(index, *amount, source, target))
        .collect()
}
