//! # PriceBook
//!
//! Latest-price indexing and cross-currency conversion over timestamped
//! price feeds.
//!
//! A feed is a flat list of `(currency, price, date)` records with repeats
//! and out-of-order timestamps. PriceBook reduces it to one latest price
//! per currency and answers conversion queries by routing through the
//! feed's common reference unit.
//!
//! ## Example
//!
//! ```rust
//! use pricebook::prelude::*;
//! use chrono::{TimeZone, Utc};
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
//! let quote = convert(&index, &ConversionQuery::new("ATOM", "OSMO", 10.0)).unwrap();
//! assert!((quote.target_amount - 10.0 * 7.25 / 0.42).abs() < 1e-9);
//! ```

pub mod convert;
pub mod error;
pub mod feed;
pub mod holdings;
pub mod index;
pub mod observation;
pub mod types;

pub mod prelude {
    //! Commonly used types and functions
    pub use crate::convert::{convert, convert_amount, Conversion, ConversionQuery};
    pub use crate::error::{PriceBookError, Result};
    pub use crate::feed::{parse_csv, parse_json, DEFAULT_FEED_URL};
    #[cfg(feature = "async")]
    pub use crate::feed::PriceFeedClient;
    pub use crate::holdings::{value_balances, Chain, WalletBalance};
    pub use crate::index::LatestPriceIndex;
    pub use crate::observation::PriceObservation;
    pub use crate::types::*;
}
