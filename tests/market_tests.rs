//! Public market-data endpoints against a mock server, including the paged
//! extended-klines fetch.

mod common;

use common::{client_for, setup_mock_server};

use binance_client::{KlinesQuery, Market};
use serde_json::{json, Value};
use tokio_test::assert_ok;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

const HOUR_MS: i64 = 3_600_000;

fn kline_row(open_time: i64) -> Value {
    json!([
        open_time,
        "35000.00",
        "35100.00",
        "34900.00",
        "35050.00",
        "123.456",
        open_time + HOUR_MS - 1,
        "4325000.12",
        9876,
        "61.2",
        "2145000.50",
        "0"
    ])
}

fn kline_page(first_open_time: i64, rows: usize) -> Value {
    Value::Array(
        (0..rows)
            .map(|i| kline_row(first_open_time + i as i64 * HOUR_MS))
            .collect(),
    )
}

#[tokio::test]
async fn test_ping() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_ok!(client.market.ping().await);
}

#[tokio::test]
async fn test_ticker_price_is_typed() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/ticker/price"))
        .and(query_param("symbol", "BTCUSDT"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"symbol": "BTCUSDT", "price": "35050.00"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ticker = assert_ok!(client.market.ticker_price("BTCUSDT").await);
    assert_eq!(ticker.symbol, "BTCUSDT");
    assert_eq!(ticker.price, "35050.00");
}

#[tokio::test]
async fn test_spot_klines_decode() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/klines"))
        .and(query_param("symbol", "BTCUSDT"))
        .and(query_param("interval", "1h"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kline_page(1_699_560_000_000, 3)))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let query = KlinesQuery::new("BTCUSDT", "1h").limit(3);
    let klines = assert_ok!(client.market.klines(Market::Spot, &query).await);
    assert_eq!(klines.len(), 3);
    assert_eq!(klines[0].open_time, 1_699_560_000_000);
    assert_eq!(klines[2].close, "35050.00");
}

#[tokio::test]
async fn test_futures_klines_use_futures_path() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/fapi/v1/klines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kline_page(1_699_560_000_000, 2)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let query = KlinesQuery::new("BTCUSDT", "1h").limit(2);
    let klines = assert_ok!(client.market.klines(Market::Futures, &query).await);
    assert_eq!(klines.len(), 2);
}

#[tokio::test]
async fn test_klines_extended_pages_backwards_oldest_first() {
    let server = setup_mock_server().await;

    let end_time: i64 = 5_000_000_000_000;
    // Newest page: 1000 rows ending just before the requested endTime
    let page1_start = end_time - 1000 * HOUR_MS;
    // Older page: the 500 rows before that
    let page2_start = page1_start - 500 * HOUR_MS;

    Mock::given(method("GET"))
        .and(path("/api/v3/klines"))
        .and(query_param("endTime", end_time.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(kline_page(page1_start, 1000)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v3/klines"))
        .and(query_param("endTime", (page1_start - 1).to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(kline_page(page2_start, 500)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let query = KlinesQuery::new("BTCUSDT", "1h").end_time(end_time);
    let klines = assert_ok!(client.market.klines_extended(Market::Spot, &query, 1500).await);

    assert_eq!(klines.len(), 1500);
    assert_eq!(klines[0].open_time, page2_start);
    assert!(
        klines.windows(2).all(|w| w[0].open_time < w[1].open_time),
        "rows must be oldest-first"
    );
}

#[tokio::test]
async fn test_klines_extended_stops_when_history_runs_out() {
    let server = setup_mock_server().await;

    let end_time: i64 = 5_000_000_000_000;
    let page1_start = end_time - 1000 * HOUR_MS;
    // Only 200 rows of history left behind the first page
    let page2_start = page1_start - 200 * HOUR_MS;

    Mock::given(method("GET"))
        .and(path("/api/v3/klines"))
        .and(query_param("endTime", end_time.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(kline_page(page1_start, 1000)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v3/klines"))
        .and(query_param("endTime", (page1_start - 1).to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(kline_page(page2_start, 200)))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let query = KlinesQuery::new("BTCUSDT", "1h").end_time(end_time);
    let klines = assert_ok!(client.market.klines_extended(Market::Spot, &query, 1800).await);

    assert_eq!(klines.len(), 1200);
    assert_eq!(klines[0].open_time, page2_start);
}
