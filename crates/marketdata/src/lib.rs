#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Market data client.
//!
//! This crate re-exports the core types and the provider sources, and
//! provides a [`QuoteClient`] that resolves queries against a source:
//! point quotes, date-range series, symbol search and a connectivity probe.
//!
//! # Features
//!
//! - `yahoo` - Yahoo! Finance source (default)
//!
//! # Example
//!
//! ```rust,ignore
//! use marketdata::{MarketDataQuery, QuoteClient};
//! use chrono::NaiveDate;
//!
//! #[tokio::main]
//! async fn main() -> marketdata::Result<()> {
//!     let client = QuoteClient::yahoo()?;
//!
//!     let status = client.check_connectivity().await;
//!     assert!(!status.has_errors(), "{}", status.error_message());
//!
//!     let start = NaiveDate::from_ymd_opt(2011, 1, 31).unwrap();
//!     let end = NaiveDate::from_ymd_opt(2011, 2, 1).unwrap();
//!     let query = MarketDataQuery::new("GOOG", start, "close");
//!
//!     let series = client.get_time_series(&query, end).await?;
//!     for (date, value) in series.iter() {
//!         println!("{date}: {}", value.value);
//!     }
//!
//!     for symbol in client.supported_tickers("G").await {
//!         println!("{} ({})", symbol.name, symbol.description);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use marketdata_core::*;

// Sources
#[cfg(feature = "yahoo")]
pub use marketdata_yahoo::{YahooConfig, YahooSource};

mod client;
mod config;

pub use client::QuoteClient;
pub use config::{ClientConfig, SymbolMatch};
