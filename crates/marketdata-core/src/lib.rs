#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and traits for market data clients.
//!
//! This crate provides the foundational abstractions shared by the client
//! and its sources:
//!
//! - [`QuoteSource`](source::QuoteSource) - Port to a remote quote provider
//! - [`MarketDataQuery`](types::MarketDataQuery) - Ticker/date/field request
//! - [`MarketDataValue`](types::MarketDataValue) and [`TimeSeries`](types::TimeSeries) - Results
//! - [`SymbolDefinition`](types::SymbolDefinition) - Symbol search results
//! - [`QuoteError`](error::QuoteError) and [`Status`](status::Status) - Failure reporting

/// Error types for market data operations.
pub mod error;
/// Quote field and market data type definitions.
pub mod field;
/// The quote source port.
pub mod source;
/// Operation status companion.
pub mod status;
/// Core data types (Symbol, queries, values, suggestions).
pub mod types;

// Re-export commonly used items at crate root
pub use error::{QuoteError, Result};
pub use field::{MarketDataType, QuoteField};
pub use source::QuoteSource;
pub use status::Status;
pub use types::{
    DailyBar, MarketDataQuery, MarketDataValue, Symbol, SymbolDefinition, SymbolSuggestion,
    TimeSeries,
};
