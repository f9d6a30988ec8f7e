//! Price feed parsing and loading
//!
//! A feed is a flat list of [`PriceObservation`] records, as published by
//! token price endpoints: a JSON array of `{"currency", "date", "price"}`
//! objects, or the same columns in CSV. Parsing is strict by default; the
//! `_lossy` variant drops malformed records with a warning instead, for
//! feeds known to carry occasional junk (missing prices, empty tokens).
//!
//! # Example
//! ```
//! use pricebook::feed::parse_json;
//! use pricebook::index::LatestPriceIndex;
//!
//! let raw = r#"[
//!     {"currency":"ATOM","date":"2023-08-29T07:10:40.000Z","price":7.186},
//!     {"currency":"OSMO","date":"2023-08-29T07:10:45.000Z","price":0.4242}
//! ]"#;
//!
//! let observations = parse_json(raw).unwrap();
//! let index = LatestPriceIndex::from_observations(observations);
//! assert_eq!(index.len(), 2);
//! ```

#[cfg(feature = "async")]
pub mod http;

#[cfg(feature = "async")]
pub use http::PriceFeedClient;

use std::fs;
use std::path::Path;

use crate::error::{PriceBookError, Result};
use crate::observation::PriceObservation;

/// Public token price endpoint this crate was built against
pub const DEFAULT_FEED_URL: &str = "https://interview.switcheo.com/prices.json";

/// Parse a JSON array of observations, rejecting the whole feed on the
/// first structural or validation failure.
pub fn parse_json(data: &str) -> Result<Vec<PriceObservation>> {
    let observations: Vec<PriceObservation> = serde_json::from_str(data)?;
    for (i, obs) in observations.iter().enumerate() {
        obs.validate().map_err(|e| annotate(e, i + 1))?;
    }
    Ok(observations)
}

/// Parse a JSON array of observations, dropping records that fail to
/// deserialize or validate. Returns the surviving observations and the
/// number of records dropped. The array itself must still be well-formed
/// JSON.
pub fn parse_json_lossy(data: &str) -> Result<(Vec<PriceObservation>, usize)> {
    let records: Vec<serde_json::Value> = serde_json::from_str(data)?;
    let total = records.len();

    let mut observations = Vec::with_capacity(total);
    for (i, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<PriceObservation>(record) {
            Ok(obs) => match obs.validate() {
                Ok(()) => observations.push(obs),
                Err(e) => log::warn!("Dropping feed record {}: {}", i + 1, e),
            },
            Err(e) => log::warn!("Dropping feed record {}: {}", i + 1, e),
        }
    }

    let dropped = total - observations.len();
    if dropped > 0 {
        log::warn!("Feed parsed with {} of {} records dropped", dropped, total);
    }
    Ok((observations, dropped))
}

/// Parse CSV observations with a `currency,date,price` header
pub fn parse_csv(data: &str) -> Result<Vec<PriceObservation>> {
    let mut reader = csv::Reader::from_reader(data.as_bytes());
    let mut observations = Vec::new();

    for (i, result) in reader.deserialize().enumerate() {
        let obs: PriceObservation = result
            .map_err(|e| PriceBookError::ParseError(format!("CSV record {}: {}", i + 1, e)))?;
        obs.validate().map_err(|e| annotate(e, i + 1))?;
        observations.push(obs);
    }

    Ok(observations)
}

/// Load and parse a JSON feed file
pub fn load_json_file(path: impl AsRef<Path>) -> Result<Vec<PriceObservation>> {
    let data = fs::read_to_string(path)?;
    parse_json(&data)
}

/// Load and parse a CSV feed file
pub fn load_csv_file(path: impl AsRef<Path>) -> Result<Vec<PriceObservation>> {
    let data = fs::read_to_string(path)?;
    parse_csv(&data)
}

fn annotate(err: PriceBookError, record: usize) -> PriceBookError {
    match err {
        PriceBookError::InvalidObservation(msg) => {
            PriceBookError::InvalidObservation(format!("record {}: {}", record, msg))
        }
        other => other,
    }
}
