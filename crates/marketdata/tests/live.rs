//! Live checks against Yahoo! Finance.
//!
//! Run with `cargo test -p marketdata --test live -- --ignored`. Yahoo
//! reports split-adjusted history, so prices are checked for shape rather
//! than against fixed quotes.
#![cfg(feature = "yahoo")]

use chrono::NaiveDate;
use marketdata::{MarketDataQuery, QuoteClient};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
#[ignore = "exercise live Yahoo Finance API"]
async fn live_connectivity() {
    let client = QuoteClient::yahoo().unwrap();
    let status = client.check_connectivity().await;
    assert!(!status.has_errors(), "{}", status.error_message());
}

#[tokio::test]
#[ignore = "exercise live Yahoo Finance API"]
async fn live_request_one_entry() {
    let client = QuoteClient::yahoo().unwrap();
    let query = MarketDataQuery::new("GOOG", date(2011, 1, 31), "open");

    let open = client.get_market_data(&query).await.unwrap();
    assert_eq!(open.timestamp, date(2011, 1, 31));
    assert!(open.value > 0.0);

    let close = client
        .get_market_data(&query.with_field("close"))
        .await
        .unwrap();
    assert_eq!(close.timestamp, date(2011, 1, 31));
    assert!(close.value > 0.0);
}

#[tokio::test]
#[ignore = "exercise live Yahoo Finance API"]
async fn live_request_multiple_entries() {
    let client = QuoteClient::yahoo().unwrap();
    let query = MarketDataQuery::new("GOOG", date(2011, 1, 31), "close");

    let series = client
        .get_time_series(&query, date(2011, 2, 1))
        .await
        .unwrap();

    assert_eq!(series.dates(), &[date(2011, 2, 1), date(2011, 1, 31)]);
    // GOOG closed higher on 2011-02-01 than on 2011-01-31.
    assert!(series.values()[0].value > series.values()[1].value);
}

#[tokio::test]
#[ignore = "exercise live Yahoo Finance API"]
async fn live_ticker_list() {
    let client = QuoteClient::yahoo().unwrap();
    let data = client.supported_tickers("G").await;

    // Yahoo's suggestions vary over time; only check they are well formed.
    assert!(!data.is_empty());
    assert!(
        data.iter()
            .all(|d| !d.name.is_empty() && d.description.starts_with("Yahoo! Finance "))
    );
}
