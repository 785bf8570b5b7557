//! `QuoteClient` over `YahooSource`, served by a mock Yahoo server.
#![cfg(feature = "yahoo")]

use std::time::Duration;

use chrono::NaiveDate;
use httpmock::prelude::*;
use marketdata::{MarketDataQuery, QuoteClient, QuoteError, Status, SymbolDefinition, YahooConfig};

const GOOG_CHART: &str = include_str!("fixtures/goog_chart.json");
const EMPTY_CHART: &str = include_str!("fixtures/empty_chart.json");
const SEARCH_G: &str = include_str!("fixtures/search_g.json");

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn client_for(server: &MockServer) -> QuoteClient {
    let config = YahooConfig::default()
        .with_base_url(&server.base_url())
        .with_rate_limit(Duration::ZERO);
    QuoteClient::yahoo_with(config).unwrap()
}

async fn goog_server() -> MockServer {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v8/finance/chart/GOOG");
            then.status(200)
                .header("content-type", "application/json")
                .body(GOOG_CHART);
        })
        .await;
    server
}

#[tokio::test]
async fn connectivity() {
    let server = goog_server().await;
    server
        .mock_async(|when, then| {
            when.method(GET).query_param("range", "1d");
            then.status(200).body(GOOG_CHART);
        })
        .await;

    let status = client_for(&server).check_connectivity().await;
    assert!(!status.has_errors(), "{}", status.error_message());
}

#[tokio::test]
async fn connectivity_failure_is_reported_in_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(500);
        })
        .await;

    let status = client_for(&server).check_connectivity().await;
    assert!(status.has_errors());
    assert!(!status.error_message().is_empty());
}

#[tokio::test]
async fn connectivity_times_out_once() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).query_param("range", "1d");
            then.status(200)
                .delay(Duration::from_secs(2))
                .body(GOOG_CHART);
        })
        .await;

    let config = YahooConfig::default()
        .with_base_url(&server.base_url())
        .with_rate_limit(Duration::ZERO)
        .with_timeout(Duration::from_millis(200));
    let status = QuoteClient::yahoo_with(config)
        .unwrap()
        .check_connectivity()
        .await;

    assert!(status.has_errors());
    assert!(status.error_message().contains("timed out"));
    assert_eq!(mock.hits_async().await, 1);
}

#[tokio::test]
async fn request_one_entry() {
    let server = goog_server().await;
    let client = client_for(&server);

    let mut query = MarketDataQuery::new("GOOG", date(2011, 1, 31), "open")
        .with_data_type("DVPLI.MarketDataTypes.Scalar");

    let result = client.get_market_data(&query).await;
    let status = Status::from(&result);
    assert!(!status.has_errors(), "{}", status.error_message());
    let data = result.unwrap();
    assert_eq!(data.timestamp, date(2011, 1, 31));
    assert!((data.value - 603.0).abs() <= 1.0);

    query.field = "close".to_string();

    let data = client.get_market_data(&query).await.unwrap();
    assert_eq!(data.timestamp, date(2011, 1, 31));
    assert!((data.value - 600.0).abs() <= 1.0);
}

#[tokio::test]
async fn request_multiple_entries() {
    let server = goog_server().await;
    let client = client_for(&server);

    let query = MarketDataQuery::new("GOOG", date(2011, 1, 31), "open");

    let series = client
        .get_time_series(&query, date(2011, 2, 1))
        .await
        .unwrap();
    let (dates, datas) = series.into_parts();

    assert_eq!(datas.len(), 2);
    assert_eq!(dates.len(), 2);
    assert_eq!(datas[0].timestamp, date(2011, 2, 1));
    assert_eq!(datas[1].timestamp, date(2011, 1, 31));
    assert_eq!(dates, vec![date(2011, 2, 1), date(2011, 1, 31)]);
    assert!((datas[0].value - 604.0).abs() <= 1.0);
    assert!((datas[1].value - 603.0).abs() <= 1.0);

    let series = client
        .get_time_series(&query.with_field("close"), date(2011, 2, 1))
        .await
        .unwrap();

    assert_eq!(series.len(), 2);
    assert_eq!(series.values()[0].timestamp, date(2011, 2, 1));
    assert_eq!(series.values()[1].timestamp, date(2011, 1, 31));
    assert!((series.values()[0].value - 611.0).abs() <= 1.0);
    assert!((series.values()[1].value - 600.0).abs() <= 1.0);
}

#[tokio::test]
async fn weekend_has_no_data() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v8/finance/chart/GOOG");
            then.status(200).body(EMPTY_CHART);
        })
        .await;
    let client = client_for(&server);
    let query = MarketDataQuery::new("GOOG", date(2011, 1, 29), "open");

    let result = client.get_market_data(&query).await;
    assert!(matches!(result, Err(QuoteError::NoData { .. })));

    let result = client.get_time_series(&query, date(2011, 1, 30)).await;
    assert!(matches!(result, Err(QuoteError::NoData { .. })));
}

#[tokio::test]
async fn ticker_list() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/finance/search")
                .query_param("q", "G");
            then.status(200)
                .header("content-type", "application/json")
                .body(SEARCH_G);
        })
        .await;

    let data = client_for(&server).supported_tickers("G").await;

    assert!(data.contains(&SymbolDefinition::new("G", "Yahoo! Finance Equity")));
    assert!(data.contains(&SymbolDefinition::new("GOOG", "Yahoo! Finance Equity")));
    assert!(data.contains(&SymbolDefinition::new("GE", "Yahoo! Finance Equity")));
    assert!(data.contains(&SymbolDefinition::new("GLD", "Yahoo! Finance ETF")));
    assert!(data.iter().all(|d| !d.description.is_empty()));
}

#[tokio::test]
async fn ticker_list_without_matches_is_empty() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/finance/search");
            then.status(200)
                .body(r#"{"explains":[],"count":0,"quotes":[],"news":[]}"#);
        })
        .await;

    assert!(client_for(&server).supported_tickers("QQQQZZ").await.is_empty());
}
