//! Quote field and market data type definitions.
//!
//! This module defines [`QuoteField`] for selecting a scalar out of a daily bar
//! and [`MarketDataType`] for the shape of the value a query expects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{error::QuoteError, types::DailyBar};

/// A scalar field of a daily price bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteField {
    /// Opening price.
    Open,
    /// Highest price of the session.
    High,
    /// Lowest price of the session.
    Low,
    /// Closing price.
    Close,
    /// Traded volume.
    Volume,
    /// Split/dividend adjusted closing price.
    AdjustedClose,
}

impl QuoteField {
    /// All supported fields.
    pub const ALL: [Self; 6] = [
        Self::Open,
        Self::High,
        Self::Low,
        Self::Close,
        Self::Volume,
        Self::AdjustedClose,
    ];

    /// Returns the canonical lowercase name of the field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
            Self::Volume => "volume",
            Self::AdjustedClose => "adjclose",
        }
    }

    /// Projects a bar onto this field.
    ///
    /// Returns `None` when the provider reported no value for the field.
    #[must_use]
    pub const fn select(&self, bar: &DailyBar) -> Option<f64> {
        match self {
            Self::Open => bar.open,
            Self::High => bar.high,
            Self::Low => bar.low,
            Self::Close => bar.close,
            Self::Volume => bar.volume,
            Self::AdjustedClose => bar.adjusted_close,
        }
    }
}

impl fmt::Display for QuoteField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuoteField {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "high" => Ok(Self::High),
            "low" => Ok(Self::Low),
            "close" => Ok(Self::Close),
            "volume" => Ok(Self::Volume),
            "adjclose" | "adj close" | "adjusted_close" => Ok(Self::AdjustedClose),
            _ => Err(QuoteError::UnsupportedField(s.to_string())),
        }
    }
}

/// Shape of the value a query expects back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketDataType {
    /// A single timestamped floating-point value.
    #[default]
    Scalar,
}

impl MarketDataType {
    /// Returns the tag used in queries for this type.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Scalar => "Scalar",
        }
    }
}

impl fmt::Display for MarketDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for MarketDataType {
    type Err = QuoteError;

    /// Accepts the bare tag or a namespaced type name such as
    /// `MarketDataTypes.Scalar`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let last = s.trim().rsplit(['.', ':']).next().unwrap_or_default();
        if last.eq_ignore_ascii_case("scalar") {
            Ok(Self::Scalar)
        } else {
            Err(QuoteError::UnsupportedDataType(s.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_fields() {
        assert_eq!("open".parse::<QuoteField>().unwrap(), QuoteField::Open);
        assert_eq!("Close".parse::<QuoteField>().unwrap(), QuoteField::Close);
        assert_eq!(
            "Adj Close".parse::<QuoteField>().unwrap(),
            QuoteField::AdjustedClose
        );
        for field in QuoteField::ALL {
            assert_eq!(field.as_str().parse::<QuoteField>().unwrap(), field);
        }
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = "bid".parse::<QuoteField>().unwrap_err();
        assert_eq!(err, QuoteError::UnsupportedField("bid".to_string()));
    }

    #[test]
    fn test_parse_data_type() {
        assert_eq!(
            "scalar".parse::<MarketDataType>().unwrap(),
            MarketDataType::Scalar
        );
        assert_eq!(
            "DVPLI.MarketDataTypes.Scalar"
                .parse::<MarketDataType>()
                .unwrap(),
            MarketDataType::Scalar
        );
        assert!(matches!(
            "MarketDataTypes.Fairmat.Curve".parse::<MarketDataType>(),
            Err(QuoteError::UnsupportedDataType(_))
        ));
        assert!("".parse::<MarketDataType>().is_err());
    }

    #[test]
    fn test_select() {
        let bar = DailyBar {
            date: NaiveDate::from_ymd_opt(2011, 1, 31).unwrap(),
            open: Some(603.6),
            high: Some(604.5),
            low: Some(595.6),
            close: Some(600.4),
            volume: None,
            adjusted_close: None,
        };
        assert_eq!(QuoteField::Open.select(&bar), Some(603.6));
        assert_eq!(QuoteField::Close.select(&bar), Some(600.4));
        assert_eq!(QuoteField::Volume.select(&bar), None);
    }
}
