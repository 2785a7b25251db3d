//! Error handling module for bundle quoting
//!
//! Provides centralized error types using thiserror. Quoting itself can only
//! fail on a catalog lookup miss; the remaining variants cover input parsing
//! and pricing-table files.

use thiserror::Error;

use crate::types::CatalogYear;

/// Main error type for bundle quoting
#[derive(Error, Debug)]
pub enum QuoteError {
    /// The active price catalog has no entry for the requested year
    #[error("unknown catalog year: {0}")]
    UnknownCatalogYear(CatalogYear),

    /// A year number outside the supported set
    #[error("unsupported catalog year: {0}")]
    UnsupportedYear(u16),

    /// Pricing table consistency errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Pricing tables that could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for quoting operations
pub type Result<T> = std::result::Result<T, QuoteError>;

impl QuoteError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
