#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Yahoo! Finance quote source.
//!
//! This crate provides [`YahooSource`], an implementation of the
//! [`QuoteSource`] port from `marketdata-core`.
//!
//! # Features
//!
//! - Daily rows from Yahoo Finance's chart API, dated in the exchange calendar
//! - Symbol suggestions from the search API
//! - Built-in rate limiting (1 request per second by default)
//! - Configurable endpoints, timeout and user agent through [`YahooConfig`]
//!
//! # Example
//!
//! ```rust,ignore
//! use marketdata_yahoo::{YahooConfig, YahooSource};
//! use marketdata_core::{QuoteSource, Symbol};
//! use chrono::NaiveDate;
//!
//! # async fn example() -> marketdata_core::Result<()> {
//! let source = YahooSource::new(YahooConfig::default())?;
//! let start = NaiveDate::from_ymd_opt(2011, 1, 31).unwrap();
//! let end = NaiveDate::from_ymd_opt(2011, 2, 1).unwrap();
//!
//! let bars = source.fetch_daily(&Symbol::new("GOOG"), start, end).await?;
//! println!("Fetched {} rows", bars.len());
//! # Ok(())
//! # }
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Days, FixedOffset, NaiveDate, Offset, TimeZone, Utc};
use marketdata_core::{DailyBar, QuoteError, QuoteSource, Result, Symbol, SymbolSuggestion};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tracing::{debug, warn};

mod config;

pub use config::{DEFAULT_CHART_URL, DEFAULT_SEARCH_URL, DEFAULT_USER_AGENT, YahooConfig};

/// Name reported by [`YahooSource`]; prefixes every symbol description.
pub const PROVIDER_NAME: &str = "Yahoo! Finance";

/// Yahoo! Finance quote source.
///
/// Implements [`QuoteSource`] over the chart and search APIs.
#[derive(Debug)]
pub struct YahooSource {
    client: reqwest::Client,
    config: YahooConfig,
    last_request_time: AtomicU64,
}

impl YahooSource {
    /// Create a new Yahoo Finance source from a configuration.
    ///
    /// Builds an HTTP client carrying the configured user agent and timeout.
    /// A zero timeout is rejected, since every request would fail at once.
    pub fn new(config: YahooConfig) -> Result<Self> {
        if config.timeout_ms == 0 {
            return Err(QuoteError::InvalidParameter(
                "timeout must be greater than zero".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()
            .map_err(|e| QuoteError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self::with_client(client, config))
    }

    /// Create a new Yahoo Finance source with a custom HTTP client.
    ///
    /// The client's own user agent and timeout settings are used; the
    /// configuration still provides endpoints and rate limiting.
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: YahooConfig) -> Self {
        Self {
            client,
            config,
            last_request_time: AtomicU64::new(0),
        }
    }

    /// Returns the configuration in use.
    #[must_use]
    pub const fn config(&self) -> &YahooConfig {
        &self.config
    }

    /// Apply rate limiting before making a request.
    async fn apply_rate_limit(&self) {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        let last = self.last_request_time.load(Ordering::Relaxed);
        let elapsed = now.saturating_sub(last);

        if elapsed < self.config.rate_limit_ms {
            let wait_time = self.config.rate_limit_ms - elapsed;
            debug!("Rate limiting: waiting {}ms", wait_time);
            sleep(Duration::from_millis(wait_time)).await;
        }

        self.last_request_time.store(
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis() as u64,
            Ordering::Relaxed,
        );
    }

    /// Chart API URL with the symbol appended as one encoded path segment.
    fn chart_url(&self, symbol: &str) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.config.chart_url)
            .map_err(|e| QuoteError::InvalidParameter(format!("chart url: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| {
                QuoteError::InvalidParameter(format!(
                    "chart url cannot take a path: {}",
                    self.config.chart_url
                ))
            })?
            .pop_if_empty()
            .push(symbol);
        Ok(url)
    }

    /// Build the chart API URL for a symbol and date range.
    ///
    /// The window is widened by a day on each side so that exchanges far from
    /// UTC still have their sessions inside it.
    fn build_chart_url(
        &self,
        symbol: &Symbol,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<String> {
        let start_ts = start
            .checked_sub_days(Days::new(1))
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| Utc.from_utc_datetime(&dt).timestamp())
            .unwrap_or(0);

        let end_ts = end
            .checked_add_days(Days::new(1))
            .and_then(|d| d.and_hms_opt(23, 59, 59))
            .map(|dt| Utc.from_utc_datetime(&dt).timestamp())
            .unwrap_or(0);

        let mut url = self.chart_url(symbol.as_str())?;
        url.query_pairs_mut()
            .append_pair("period1", &start_ts.to_string())
            .append_pair("period2", &end_ts.to_string())
            .append_pair("interval", "1d")
            .append_pair("includeAdjustedClose", "true");
        Ok(url.into())
    }

    /// Build the chart API URL used by the connectivity probe.
    fn build_probe_url(&self) -> Result<String> {
        let mut url = self.chart_url(&self.config.probe_symbol)?;
        url.query_pairs_mut()
            .append_pair("range", "1d")
            .append_pair("interval", "1d");
        Ok(url.into())
    }

    /// Build the search API URL for a prefix, percent-encoding the query.
    fn build_search_url(&self, prefix: &str) -> Result<String> {
        let count = self.config.suggestion_count.to_string();
        let url = reqwest::Url::parse_with_params(
            &self.config.search_url,
            &[
                ("q", prefix),
                ("quotesCount", count.as_str()),
                ("newsCount", "0"),
                ("listsCount", "0"),
            ],
        )
        .map_err(|e| QuoteError::InvalidParameter(format!("search url: {e}")))?;

        Ok(url.into())
    }

    /// Make a rate-limited GET request and decode the JSON body.
    ///
    /// `subject` names what was asked for in error messages.
    async fn get_json<T: DeserializeOwned>(&self, url: &str, subject: &str) -> Result<T> {
        self.apply_rate_limit().await;
        debug!("Yahoo request: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(network_error)?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(QuoteError::RateLimited {
                provider: PROVIDER_NAME.to_string(),
                retry_after: Some(Duration::from_secs(60)),
            });
        }

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(QuoteError::SymbolNotFound(subject.to_string()));
        }

        if !response.status().is_success() {
            return Err(QuoteError::Network(format!(
                "HTTP {} for {}",
                response.status(),
                subject
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| QuoteError::Parse(e.to_string()))
    }

    /// Fetch and unwrap the single chart result for a URL.
    async fn fetch_chart(&self, url: &str, symbol: &str) -> Result<Option<ChartData>> {
        let response: ChartResponse = self.get_json(url, symbol).await?;

        // Check for API-level errors
        if let Some(error) = response.chart.error {
            if error.code == "Not Found" {
                return Err(QuoteError::SymbolNotFound(symbol.to_string()));
            }
            return Err(QuoteError::Network(format!(
                "{}: {}",
                error.code, error.description
            )));
        }

        Ok(response.chart.result.unwrap_or_default().into_iter().next())
    }
}

/// Map a transport failure, keeping timeouts recognisable in the message.
fn network_error(e: reqwest::Error) -> QuoteError {
    if e.is_timeout() {
        QuoteError::Network(format!("request timed out: {e}"))
    } else {
        QuoteError::Network(e.to_string())
    }
}

/// Convert chart data into daily bars dated in the exchange calendar.
///
/// Rows whose date falls outside `[start, end]` are dropped.
fn parse_chart_data(
    symbol: &Symbol,
    data: ChartData,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DailyBar>> {
    let timestamps = data.timestamp.unwrap_or_default();

    if timestamps.is_empty() {
        return Ok(Vec::new());
    }

    let offset = data
        .meta
        .as_ref()
        .and_then(|m| m.gmtoffset)
        .and_then(|secs| i32::try_from(secs).ok())
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix());

    let quote = data
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| QuoteError::Parse(format!("Missing quote data for {symbol}")))?;

    let adj_close = data
        .indicators
        .adjclose
        .and_then(|ac| ac.into_iter().next())
        .map(|ac| ac.adjclose)
        .unwrap_or_default();

    fn at(column: &[Option<f64>], i: usize) -> Option<f64> {
        column.get(i).copied().flatten()
    }

    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let Some(date) =
            DateTime::from_timestamp(ts, 0).map(|dt| dt.with_timezone(&offset).date_naive())
        else {
            warn!(symbol = %symbol, timestamp = ts, "Skipping row with invalid timestamp");
            continue;
        };

        if date < start || date > end {
            continue;
        }

        bars.push(DailyBar {
            date,
            open: at(&quote.open, i),
            high: at(&quote.high, i),
            low: at(&quote.low, i),
            close: at(&quote.close, i),
            volume: at(&quote.volume, i),
            adjusted_close: at(&adj_close, i),
        });
    }

    Ok(bars)
}

/// Display form of a Yahoo `quoteType`.
fn display_kind(quote_type: &str) -> String {
    match quote_type.to_ascii_uppercase().as_str() {
        "EQUITY" => "Equity".to_string(),
        "ETF" => "ETF".to_string(),
        "MUTUALFUND" => "Fund".to_string(),
        "INDEX" => "Index".to_string(),
        "CURRENCY" => "Currency".to_string(),
        "CRYPTOCURRENCY" => "Cryptocurrency".to_string(),
        "FUTURE" => "Futures".to_string(),
        "OPTION" => "Option".to_string(),
        "" => "Security".to_string(),
        _ => quote_type.to_string(),
    }
}

impl SearchQuote {
    fn into_suggestion(self) -> Option<SymbolSuggestion> {
        let symbol = self.symbol.filter(|s| !s.is_empty())?;
        let kind = match self.type_disp {
            Some(kind) if !kind.is_empty() => kind,
            _ => display_kind(self.quote_type.as_deref().unwrap_or_default()),
        };

        let mut suggestion = SymbolSuggestion::new(symbol, kind);
        if let Some(name) = self.longname.or(self.shortname) {
            suggestion = suggestion.with_name(name);
        }
        if let Some(exchange) = self.exch_disp.or(self.exchange) {
            suggestion = suggestion.with_exchange(exchange);
        }
        Some(suggestion)
    }
}

#[async_trait]
impl QuoteSource for YahooSource {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn ping(&self) -> Result<()> {
        let url = self.build_probe_url()?;
        match self.fetch_chart(&url, &self.config.probe_symbol).await? {
            Some(_) => Ok(()),
            None => Err(QuoteError::EmptyResponse(format!(
                "no chart result for probe symbol {}",
                self.config.probe_symbol
            ))),
        }
    }

    async fn fetch_daily(
        &self,
        symbol: &Symbol,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>> {
        // Validate date range
        if start > end {
            return Err(QuoteError::InvalidParameter(format!(
                "Start date {} is after end date {}",
                start, end
            )));
        }

        let url = self.build_chart_url(symbol, start, end)?;

        let data = self
            .fetch_chart(&url, symbol.as_str())
            .await?
            .ok_or_else(|| QuoteError::EmptyResponse(format!("no chart result for {symbol}")))?;

        let bars = parse_chart_data(symbol, data, start, end)?;
        debug!(symbol = %symbol, rows = bars.len(), "Parsed chart response");
        Ok(bars)
    }

    async fn fetch_suggestions(&self, prefix: &str) -> Result<Vec<SymbolSuggestion>> {
        let url = self.build_search_url(prefix)?;
        let response: SearchResponse = self.get_json(&url, prefix).await?;

        let suggestions: Vec<SymbolSuggestion> = response
            .quotes
            .into_iter()
            .filter_map(SearchQuote::into_suggestion)
            .collect();

        debug!(prefix, count = suggestions.len(), "Parsed search response");
        Ok(suggestions)
    }
}

// ============================================================================
// Yahoo Finance API Response Types
// ============================================================================

/// Chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: Option<ChartMeta>,
    timestamp: Option<Vec<i64>>,
    #[serde(default)]
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    gmtoffset: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteData>,
    adjclose: Option<Vec<AdjClose>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

/// Search API response.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    quotes: Vec<SearchQuote>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchQuote {
    symbol: Option<String>,
    shortname: Option<String>,
    longname: Option<String>,
    exchange: Option<String>,
    exch_disp: Option<String>,
    quote_type: Option<String>,
    type_disp: Option<String>,
}
