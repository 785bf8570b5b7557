//! Core data types for market data lookups.
//!
//! This module defines the fundamental data structures:
//!
//! - [`Symbol`] - Trading symbol/ticker
//! - [`MarketDataQuery`] - A ticker/date/field request
//! - [`MarketDataValue`] - A timestamped scalar
//! - [`TimeSeries`] - Date-aligned scalars, latest first
//! - [`SymbolDefinition`] - A ticker and its classification
//! - [`DailyBar`] - A raw daily row reported by a source
//! - [`SymbolSuggestion`] - A raw autocomplete row reported by a source

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::field::MarketDataType;

/// A trading symbol/ticker.
///
/// Symbols are automatically uppercased on creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a new symbol from a string, converting to uppercase.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().trim().to_uppercase())
    }

    /// Returns the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the symbol is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Symbol {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A request for one field of one ticker, anchored at a date.
///
/// For point lookups `date` is the requested day; for series it is the first
/// day of the range.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketDataQuery {
    /// Ticker to look up.
    pub ticker: Symbol,
    /// Requested (or first) date.
    pub date: NaiveDate,
    /// Tag of the expected result shape, e.g. `"Scalar"`.
    pub data_type: String,
    /// Field name, e.g. `"open"` or `"close"`.
    pub field: String,
}

impl MarketDataQuery {
    /// Creates a scalar query for a ticker, date and field.
    #[must_use]
    pub fn new(ticker: impl Into<Symbol>, date: NaiveDate, field: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            date,
            data_type: MarketDataType::Scalar.tag().to_string(),
            field: field.into(),
        }
    }

    /// Returns a copy of the query asking for another field.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    /// Returns a copy of the query with another data type tag.
    #[must_use]
    pub fn with_data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = data_type.into();
        self
    }
}

/// A scalar value stamped with the trading date it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketDataValue {
    /// Trading date of the value.
    pub timestamp: NaiveDate,
    /// The value itself.
    pub value: f64,
}

impl MarketDataValue {
    /// Creates a new value.
    #[must_use]
    pub const fn new(timestamp: NaiveDate, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Dates and values of a range query, positionally aligned and latest first.
///
/// `dates()[i] == values()[i].timestamp` holds for every index.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    dates: Vec<NaiveDate>,
    values: Vec<MarketDataValue>,
}

impl TimeSeries {
    /// Creates a series from values, ordering them latest first.
    ///
    /// When several values share a date only the first one is kept.
    #[must_use]
    pub fn from_values(mut values: Vec<MarketDataValue>) -> Self {
        values.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        values.dedup_by_key(|v| v.timestamp);
        let dates = values.iter().map(|v| v.timestamp).collect();
        Self { dates, values }
    }

    /// Returns the dates, latest first.
    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Returns the values, latest first.
    #[must_use]
    pub fn values(&self) -> &[MarketDataValue] {
        &self.values
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns an iterator over `(date, value)` pairs, latest first.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &MarketDataValue)> {
        self.dates.iter().copied().zip(self.values.iter())
    }

    /// Consumes the series and returns the aligned vectors.
    #[must_use]
    pub fn into_parts(self) -> (Vec<NaiveDate>, Vec<MarketDataValue>) {
        (self.dates, self.values)
    }
}

/// A ticker and a human-readable classification of it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolDefinition {
    /// Ticker symbol.
    pub name: String,
    /// Classification, e.g. `"Yahoo! Finance Equity"`.
    pub description: String,
}

impl SymbolDefinition {
    /// Creates a new symbol definition.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// One daily row as reported by a quote source.
///
/// Price fields are optional because providers report nulls for rows
/// without trades.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    /// Trading date in the exchange's calendar.
    pub date: NaiveDate,
    /// Opening price.
    pub open: Option<f64>,
    /// Highest price of the session.
    pub high: Option<f64>,
    /// Lowest price of the session.
    pub low: Option<f64>,
    /// Closing price.
    pub close: Option<f64>,
    /// Traded volume.
    pub volume: Option<f64>,
    /// Split/dividend adjusted closing price.
    pub adjusted_close: Option<f64>,
}

impl DailyBar {
    /// Creates a bar with no values for the given date.
    #[must_use]
    pub const fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            open: None,
            high: None,
            low: None,
            close: None,
            volume: None,
            adjusted_close: None,
        }
    }
}

/// One autocomplete row as reported by a quote source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolSuggestion {
    /// Ticker symbol.
    pub symbol: String,
    /// Security name, if the source reports one.
    pub name: Option<String>,
    /// Exchange code, if the source reports one.
    pub exchange: Option<String>,
    /// Display form of the asset class, e.g. `"Equity"` or `"ETF"`.
    pub kind: String,
}

impl SymbolSuggestion {
    /// Creates a suggestion with required fields.
    #[must_use]
    pub fn new(symbol: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: None,
            exchange: None,
            kind: kind.into(),
        }
    }

    /// Sets the security name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the exchange code.
    #[must_use]
    pub fn with_exchange(mut self, exchange: impl Into<String>) -> Self {
        self.exchange = Some(exchange.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_symbol_is_uppercased() {
        assert_eq!(Symbol::new(" goog ").as_str(), "GOOG");
        assert!(Symbol::new("  ").is_empty());
    }

    #[test]
    fn test_query_defaults_to_scalar() {
        let query = MarketDataQuery::new("GOOG", date(2011, 1, 31), "open");
        assert_eq!(query.data_type, "Scalar");
        assert_eq!(query.with_field("close").field, "close");
    }

    #[test]
    fn test_time_series_orders_latest_first() {
        let series = TimeSeries::from_values(vec![
            MarketDataValue::new(date(2011, 1, 31), 603.0),
            MarketDataValue::new(date(2011, 2, 2), 610.0),
            MarketDataValue::new(date(2011, 2, 1), 604.0),
        ]);

        assert_eq!(
            series.dates(),
            &[date(2011, 2, 2), date(2011, 2, 1), date(2011, 1, 31)]
        );
        for (d, v) in series.iter() {
            assert_eq!(d, v.timestamp);
        }
    }

    #[test]
    fn test_time_series_drops_duplicate_dates() {
        let series = TimeSeries::from_values(vec![
            MarketDataValue::new(date(2011, 2, 1), 604.0),
            MarketDataValue::new(date(2011, 2, 1), 604.5),
        ]);
        assert_eq!(series.len(), 1);
        let (dates, values) = series.into_parts();
        assert_eq!(dates.len(), values.len());
    }

    #[test]
    fn test_serde_round_trip_value() {
        let value = MarketDataValue::new(date(2011, 1, 31), 603.5);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"timestamp":"2011-01-31","value":603.5}"#);
    }
}
