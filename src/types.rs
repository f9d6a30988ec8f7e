//! Core type aliases

use chrono::{DateTime, Utc};

/// Timestamp type used throughout the library
pub type Timestamp = DateTime<Utc>;

/// Currency identifier, case-sensitive as supplied by the feed
pub type CurrencyCode = String;

/// Unit price of one unit of a currency in the feed's reference unit
pub type Price = f64;

/// Monetary amount denominated in some currency
pub type Amount = f64;
