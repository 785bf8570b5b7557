//! The quote source port.
//!
//! [`QuoteSource`] is the narrow seam between query mapping and network I/O.
//! Implementations talk to one remote provider and report its answers as raw
//! rows; validation, field selection and ordering happen in the client.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::fmt::Debug;

use crate::{
    error::Result,
    types::{DailyBar, Symbol, SymbolSuggestion},
};

/// A remote provider of daily quotes and symbol suggestions.
#[async_trait]
pub trait QuoteSource: Send + Sync + Debug {
    /// Returns the name of this source (e.g., "Yahoo! Finance").
    ///
    /// Used as the prefix of symbol descriptions.
    fn name(&self) -> &str;

    /// Issues a lightweight reachability probe.
    async fn ping(&self) -> Result<()>;

    /// Fetches the daily rows the source has for `symbol` between `start`
    /// and `end` inclusive.
    ///
    /// Rows are returned as reported: order is unspecified, rows outside the
    /// range may be present, and missing values stay `None`.
    async fn fetch_daily(
        &self,
        symbol: &Symbol,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>>;

    /// Fetches autocomplete suggestions for a search prefix.
    async fn fetch_suggestions(&self, prefix: &str) -> Result<Vec<SymbolSuggestion>>;
}
