//! Error types for pricebook

use thiserror::Error;

use crate::types::CurrencyCode;

/// Main error type for pricebook
#[derive(Error, Debug)]
pub enum PriceBookError {
    #[error("Invalid amount: {0} (must be finite and non-negative)")]
    InvalidAmount(f64),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(CurrencyCode),

    #[error("Division by zero: latest price for {0} is zero")]
    DivisionByZero(CurrencyCode),

    #[error("Invalid observation: {0}")]
    InvalidObservation(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Feed error: {0}")]
    FeedError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Result type alias for pricebook operations
pub type Result<T> = std::result::Result<T, PriceBookError>;
