//! Quote client resolving queries against a [`QuoteSource`].

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, instrument, warn};

use marketdata_core::{
    DailyBar, MarketDataQuery, MarketDataType, MarketDataValue, QuoteError, QuoteField,
    QuoteSource, Result, Status, SymbolDefinition, TimeSeries,
};

use crate::config::ClientConfig;

/// Client for point quotes, date-range series and symbol search.
///
/// The client holds no mutable state: clones share the same source and
/// concurrent calls are independent. Every operation performs at most one
/// request and never retries.
///
/// # Example
///
/// ```rust,ignore
/// use marketdata::{MarketDataQuery, QuoteClient};
/// use chrono::NaiveDate;
///
/// let client = QuoteClient::yahoo()?;
/// let query = MarketDataQuery::new("GOOG", NaiveDate::from_ymd_opt(2011, 1, 31).unwrap(), "open");
///
/// let value = client.get_market_data(&query).await?;
/// println!("{} {}", value.timestamp, value.value);
/// ```
#[derive(Clone)]
pub struct QuoteClient {
    source: Arc<dyn QuoteSource>,
    config: ClientConfig,
}

impl fmt::Debug for QuoteClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuoteClient")
            .field("source", &self.source.name())
            .field("config", &self.config)
            .finish()
    }
}

impl QuoteClient {
    /// Create a client over a source with default settings.
    #[must_use]
    pub fn new(source: Arc<dyn QuoteSource>) -> Self {
        Self::with_config(source, ClientConfig::default())
    }

    /// Create a client over a source with explicit settings.
    #[must_use]
    pub fn with_config(source: Arc<dyn QuoteSource>, config: ClientConfig) -> Self {
        debug!(source = source.name(), "Creating quote client");
        Self { source, config }
    }

    /// Create a client over Yahoo! Finance with default settings.
    #[cfg(feature = "yahoo")]
    pub fn yahoo() -> Result<Self> {
        Self::yahoo_with(marketdata_yahoo::YahooConfig::default())
    }

    /// Create a client over Yahoo! Finance with a custom source configuration.
    #[cfg(feature = "yahoo")]
    pub fn yahoo_with(config: marketdata_yahoo::YahooConfig) -> Result<Self> {
        let source = marketdata_yahoo::YahooSource::new(config)?;
        Ok(Self::new(Arc::new(source)))
    }

    /// Returns the name of the underlying source.
    #[must_use]
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Returns the client settings.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Probes the source and reports whether it is reachable.
    #[instrument(skip(self), fields(source = self.source.name()))]
    pub async fn check_connectivity(&self) -> Status {
        match self.source.ping().await {
            Ok(()) => {
                debug!("Source reachable");
                Status::ok()
            }
            Err(e) => {
                warn!(error = %e, "Connectivity check failed");
                Status::from(e)
            }
        }
    }

    /// Resolves a point query into the value of the requested field on the
    /// query date.
    ///
    /// The returned timestamp is the trading date the source reported. When
    /// the source has no value for the field on that date the call fails with
    /// [`QuoteError::NoData`].
    #[instrument(skip(self, query), fields(symbol = %query.ticker, date = %query.date, field = %query.field))]
    pub async fn get_market_data(&self, query: &MarketDataQuery) -> Result<MarketDataValue> {
        let field = validate(query)?;

        let bars = self
            .source
            .fetch_daily(&query.ticker, query.date, query.date)
            .await?;

        let value = field_values(&bars, field)
            .filter(|v| v.timestamp <= query.date)
            .max_by_key(|v| v.timestamp)
            .ok_or_else(|| no_data(query, query.date))?;

        debug!(timestamp = %value.timestamp, value = value.value, "Resolved market data");
        Ok(value)
    }

    /// Resolves a range query into one value per trading date between
    /// `query.date` and `end` inclusive, latest first.
    ///
    /// Only dates the source reports a value for are returned. A source
    /// failure fails the whole request.
    #[instrument(skip(self, query, end), fields(symbol = %query.ticker, start = %query.date, end = %end, field = %query.field))]
    pub async fn get_time_series(
        &self,
        query: &MarketDataQuery,
        end: NaiveDate,
    ) -> Result<TimeSeries> {
        let field = validate(query)?;

        if query.date > end {
            return Err(QuoteError::InvalidParameter(format!(
                "Start date {} is after end date {}",
                query.date, end
            )));
        }

        let bars = self.source.fetch_daily(&query.ticker, query.date, end).await?;

        let values: Vec<MarketDataValue> = field_values(&bars, field)
            .filter(|v| v.timestamp >= query.date && v.timestamp <= end)
            .collect();

        if values.is_empty() {
            warn!("Source returned no values for range");
            return Err(no_data(query, end));
        }

        let series = TimeSeries::from_values(values);
        debug!(points = series.len(), "Resolved time series");
        Ok(series)
    }

    /// Lists the symbols the source suggests for a search prefix.
    ///
    /// Order and duplicates are kept as the source reports them, after the
    /// configured [`SymbolMatch`](crate::SymbolMatch) policy is applied. A
    /// failed search yields an empty list.
    #[instrument(skip(self), fields(source = self.source.name()))]
    pub async fn supported_tickers(&self, prefix: &str) -> Vec<SymbolDefinition> {
        if prefix.trim().is_empty() {
            debug!("Empty search prefix");
            return Vec::new();
        }

        let suggestions = match self.source.fetch_suggestions(prefix).await {
            Ok(suggestions) => suggestions,
            Err(e) => {
                warn!(error = %e, "Symbol search failed");
                return Vec::new();
            }
        };

        let provider = self.source.name();
        let definitions: Vec<SymbolDefinition> = suggestions
            .into_iter()
            .filter(|s| self.config.symbol_match.accepts(prefix, s))
            .map(|s| SymbolDefinition::new(s.symbol, format!("{provider} {}", s.kind)))
            .collect();

        debug!(count = definitions.len(), "Resolved symbol suggestions");
        definitions
    }
}

/// Check the query and resolve its field.
fn validate(query: &MarketDataQuery) -> Result<QuoteField> {
    if query.ticker.is_empty() {
        return Err(QuoteError::InvalidParameter("ticker is empty".to_string()));
    }
    if query.field.trim().is_empty() {
        return Err(QuoteError::InvalidParameter("field is empty".to_string()));
    }
    query.data_type.parse::<MarketDataType>()?;
    query.field.parse::<QuoteField>()
}

/// Project bars onto a field, skipping rows without a usable value.
fn field_values(
    bars: &[DailyBar],
    field: QuoteField,
) -> impl Iterator<Item = MarketDataValue> + '_ {
    bars.iter().filter_map(move |bar| {
        field
            .select(bar)
            .filter(|v| v.is_finite())
            .map(|v| MarketDataValue::new(bar.date, v))
    })
}

fn no_data(query: &MarketDataQuery, end: NaiveDate) -> QuoteError {
    QuoteError::NoData {
        symbol: query.ticker.to_string(),
        start: query.date.to_string(),
        end: end.to_string(),
    }
}
