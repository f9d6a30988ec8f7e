//! Wallet holdings and their valuation against a price index
//!
//! Balances live on a handful of known chains. Display ordering follows
//! chain priority (higher first), the convention inherited from the wallet
//! UIs this feed serves, and valuation is a straight conversion of each
//! balance into a reference currency.
//!
//! # Example
//! ```
//! use chrono::Utc;
//! use pricebook::holdings::{value_balances, Chain, WalletBalance};
//! use pricebook::index::LatestPriceIndex;
//! use pricebook::observation::PriceObservation;
//!
//! let now = Utc::now();
//! let index = LatestPriceIndex::from_observations(vec![
//!     PriceObservation::new("OSMO", 0.42, now),
//!     PriceObservation::new("ETH", 1645.93, now),
//!     PriceObservation::new("USD", 1.0, now),
//! ]);
//!
//! let balances = vec![
//!     WalletBalance::new("ETH", 2.0, Chain::Ethereum),
//!     WalletBalance::new("OSMO", 100.0, Chain::Osmosis),
//! ];
//!
//! let valued = value_balances(&index, &balances, "USD").unwrap();
//! // Osmosis outranks Ethereum, so the OSMO balance lists first
//! assert_eq!(valued[0].balance.currency, "OSMO");
//! assert_eq!(valued[0].value, 42.0);
//! ```

use std::fmt;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::convert::convert_amount;
use crate::error::Result;
use crate::index::LatestPriceIndex;
use crate::types::{Amount, CurrencyCode};

/// Blockchain a wallet balance lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chain {
    /// Osmosis
    Osmosis,
    /// Ethereum
    Ethereum,
    /// Arbitrum
    Arbitrum,
    /// Zilliqa
    Zilliqa,
    /// Neo
    Neo,
}

impl Chain {
    /// Get the chain name
    pub fn name(&self) -> &'static str {
        match self {
            Chain::Osmosis => "Osmosis",
            Chain::Ethereum => "Ethereum",
            Chain::Arbitrum => "Arbitrum",
            Chain::Zilliqa => "Zilliqa",
            Chain::Neo => "Neo",
        }
    }

    /// Display priority: balances on higher-priority chains list first
    pub fn priority(&self) -> i32 {
        match self {
            Chain::Osmosis => 100,
            Chain::Ethereum => 50,
            Chain::Arbitrum => 30,
            Chain::Zilliqa => 20,
            Chain::Neo => 20,
        }
    }

    /// Parse from a chain name, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "osmosis" => Some(Chain::Osmosis),
            "ethereum" => Some(Chain::Ethereum),
            "arbitrum" => Some(Chain::Arbitrum),
            "zilliqa" => Some(Chain::Zilliqa),
            "neo" => Some(Chain::Neo),
            _ => None,
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single wallet balance on some chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletBalance {
    /// Unique balance identifier
    pub id: Uuid,
    /// Currency the balance is denominated in
    pub currency: CurrencyCode,
    /// Held amount
    pub amount: Amount,
    /// Chain the balance lives on
    pub chain: Chain,
}

impl WalletBalance {
    /// Create a new balance with a fresh id
    pub fn new(currency: impl Into<CurrencyCode>, amount: Amount, chain: Chain) -> Self {
        Self {
            id: Uuid::new_v4(),
            currency: currency.into(),
            amount,
            chain,
        }
    }
}

/// A balance together with its value in the reference currency
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuedBalance {
    /// The underlying balance
    pub balance: WalletBalance,
    /// Balance value in the reference currency
    pub value: Amount,
}

/// Value positive balances in `reference` currency, ordered by chain
/// priority (highest first; equal priorities keep their input order).
///
/// Empty and negative balances are skipped outright. A balance in a
/// currency the index does not cover fails the whole valuation; partial
/// portfolio totals mislead more than they help.
pub fn value_balances(
    index: &LatestPriceIndex,
    balances: &[WalletBalance],
    reference: &str,
) -> Result<Vec<ValuedBalance>> {
    let mut held: Vec<&WalletBalance> = balances.iter().filter(|b| b.amount > 0.0).collect();
    held.sort_by(|a, b| b.chain.priority().cmp(&a.chain.priority()));

    held.into_iter()
        .map(|balance| {
            let value = convert_amount(index, balance.amount, &balance.currency, reference)?;
            Ok(ValuedBalance {
                balance: balance.clone(),
                value,
            })
        })
        .collect()
}

/// Total portfolio value per chain, in the reference currency
pub fn totals_by_chain(
    index: &LatestPriceIndex,
    balances: &[WalletBalance],
    reference: &str,
) -> Result<HashMap<Chain, Amount>> {
    let mut totals: HashMap<Chain, Amount> = HashMap::new();
    for valued in value_balances(index, balances, reference)? {
        *totals.entry(valued.balance.chain).or_insert(0.0) += valued.value;
    }
    Ok(totals)
}
