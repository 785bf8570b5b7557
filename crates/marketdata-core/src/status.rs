//! Operation status companion.
//!
//! [`Status`] condenses the outcome of an operation into "has errors" plus a
//! human-readable message, for callers that report outcomes rather than
//! branch on error variants.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::QuoteError;

/// Outcome of a market data operation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    error_message: Option<String>,
}

impl Status {
    /// A successful status.
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            error_message: None,
        }
    }

    /// A failed status carrying a message.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error_message: Some(message.into()),
        }
    }

    /// Returns true if the operation failed.
    #[must_use]
    pub const fn has_errors(&self) -> bool {
        self.error_message.is_some()
    }

    /// Returns the error message, or an empty string on success.
    #[must_use]
    pub fn error_message(&self) -> &str {
        self.error_message.as_deref().unwrap_or_default()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error_message {
            Some(message) => write!(f, "error: {message}"),
            None => f.write_str("ok"),
        }
    }
}

impl From<&QuoteError> for Status {
    fn from(error: &QuoteError) -> Self {
        Self::failed(error.to_string())
    }
}

impl From<QuoteError> for Status {
    fn from(error: QuoteError) -> Self {
        Self::from(&error)
    }
}

impl<T> From<&Result<T, QuoteError>> for Status {
    fn from(result: &Result<T, QuoteError>) -> Self {
        match result {
            Ok(_) => Self::ok(),
            Err(e) => Self::from(e),
        }
    }
}
