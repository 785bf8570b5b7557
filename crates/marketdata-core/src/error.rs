//! Error types for market data operations.
//!
//! This module defines [`QuoteError`] which covers every way a lookup can fail:
//! connectivity problems, malformed or empty provider responses, unsupported
//! query fields, and dates the provider has no data for.

use thiserror::Error;

/// Errors that can occur while resolving a market data query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
    /// Network-related errors (connection failures, timeouts, non-success HTTP status).
    #[error("Network error: {0}")]
    Network(String),

    /// Rate limit exceeded by a provider.
    #[error("Rate limited by {provider}: retry after {retry_after:?}")]
    RateLimited {
        /// The provider that rate limited the request.
        provider: String,
        /// Suggested time to wait before retrying.
        retry_after: Option<std::time::Duration>,
    },

    /// The provider response could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The provider answered without any result rows.
    #[error("Empty response: {0}")]
    EmptyResponse(String),

    /// The requested symbol is unknown to the provider.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The query names a field the client cannot resolve.
    #[error("Unsupported field: {0}")]
    UnsupportedField(String),

    /// The query names a market data type the client cannot produce.
    #[error("Unsupported market data type: {0}")]
    UnsupportedDataType(String),

    /// The provider has no data for the requested symbol and date range.
    #[error("No data for {symbol} in range {start} to {end}")]
    NoData {
        /// The symbol that was requested.
        symbol: String,
        /// Start of the requested date range.
        start: String,
        /// End of the requested date range.
        end: String,
    },

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl QuoteError {
    /// Returns true if the error comes from the transport rather than the query.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::RateLimited { .. })
    }
}

/// Result type alias using [`QuoteError`].
pub type Result<T> = std::result::Result<T, QuoteError>;
