//! Latest-price index built from a stream of observations
//!
//! The index is rebuilt wholesale from a feed snapshot rather than patched
//! incrementally, which keeps lookups trivially consistent: every query sees
//! the same snapshot until a new index replaces it.
//!
//! # Example
//! ```
//! use chrono::{TimeZone, Utc};
//! use pricebook::index::LatestPriceIndex;
//! use pricebook::observation::PriceObservation;
//!
//! let t1 = Utc.with_ymd_and_hms(2023, 8, 29, 7, 0, 0).unwrap();
//! let t2 = Utc.with_ymd_and_hms(2023, 8, 29, 8, 0, 0).unwrap();
//!
//! let index = LatestPriceIndex::from_observations(vec![
//!     PriceObservation::new("ATOM", 7.18, t1),
//!     PriceObservation::new("ATOM", 7.25, t2),
//!     PriceObservation::new("OSMO", 0.42, t1),
//! ]);
//!
//! assert_eq!(index.price("ATOM"), Some(7.25));
//! assert_eq!(index.available_currencies(), vec!["ATOM", "OSMO"]);
//! ```

use std::collections::BTreeMap;

use crate::error::{PriceBookError, Result};
use crate::observation::PriceObservation;
use crate::types::{CurrencyCode, Price};

/// Immutable map from currency to its most recent observation.
///
/// Construction is a single left-to-right reduction over the input: a record
/// replaces the held one when its timestamp is not older, so equal timestamps
/// resolve to whichever record came later in the input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LatestPriceIndex {
    entries: BTreeMap<CurrencyCode, PriceObservation>,
}

impl LatestPriceIndex {
    /// Build an index from raw observations, keeping the latest record per
    /// currency. Input is taken as-is; use [`try_from_observations`] when the
    /// records have not been validated upstream.
    ///
    /// [`try_from_observations`]: LatestPriceIndex::try_from_observations
    pub fn from_observations<I>(observations: I) -> Self
    where
        I: IntoIterator<Item = PriceObservation>,
    {
        let mut entries: BTreeMap<CurrencyCode, PriceObservation> = BTreeMap::new();
        for obs in observations {
            // Equal or newer replaces what we hold, so a timestamp tie
            // resolves to the later input record.
            let replaces = entries
                .get(&obs.currency)
                .map_or(true, |kept| obs.timestamp >= kept.timestamp);
            if replaces {
                entries.insert(obs.currency.clone(), obs);
            }
        }
        Self { entries }
    }

    /// Validate every observation, then build. Rejection is all-or-nothing:
    /// a single malformed record fails the whole batch and no index is
    /// produced.
    pub fn try_from_observations<I>(observations: I) -> Result<Self>
    where
        I: IntoIterator<Item = PriceObservation>,
    {
        let observations: Vec<PriceObservation> = observations.into_iter().collect();
        for obs in &observations {
            obs.validate()?;
        }
        Ok(Self::from_observations(observations))
    }

    /// Latest unit price for a currency, if present
    pub fn price(&self, currency: &str) -> Option<Price> {
        self.entries.get(currency).map(|obs| obs.price)
    }

    /// Latest full observation for a currency, if present
    pub fn observation(&self, currency: &str) -> Option<&PriceObservation> {
        self.entries.get(currency)
    }

    /// Whether the index holds a price for the given currency
    pub fn contains(&self, currency: &str) -> bool {
        self.entries.contains_key(currency)
    }

    /// All indexed currencies in lexicographic order, without duplicates
    pub fn available_currencies(&self) -> Vec<CurrencyCode> {
        self.entries.keys().cloned().collect()
    }

    /// Number of indexed currencies
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(currency, latest observation)` pairs in currency order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PriceObservation)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Exchange rate from `source` to `target` based on the latest prices.
    ///
    /// Multiplying a source-denominated amount by the returned rate yields
    /// the target-denominated amount. Preconditions are checked in a fixed
    /// order: source must be indexed, then target, then the target price must
    /// be strictly positive. Only then does an identical pair short-circuit
    /// to a rate of exactly 1.0.
    pub fn cross_rate(&self, source: &str, target: &str) -> Result<f64> {
        let source_price = self
            .price(source)
            .ok_or_else(|| PriceBookError::UnknownCurrency(source.to_string()))?;
        let target_price = self
            .price(target)
            .ok_or_else(|| PriceBookError::UnknownCurrency(target.to_string()))?;

        if !(target_price > 0.0) {
            return Err(PriceBookError::DivisionByZero(target.to_string()));
        }

        if source == target {
            return Ok(1.0);
        }

        Ok(source_price / target_price)
    }
}
