//! Binance API Type Definitions
//!
//! Typed responses for the endpoints whose shapes are stable. Trading
//! endpoints return `serde_json::Value` pass-through, since their response
//! shape varies with the requested response type.

use serde::{Deserialize, Serialize};

/// Response from the /api/v3/time endpoint
///
/// # Example Response
/// ```json
/// {
///   "serverTime": 1699564800000
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTimeResponse {
    /// Server time in milliseconds since Unix epoch
    pub server_time: i64,
}

impl ServerTimeResponse {
    /// Validates the server time is after the Unix epoch
    pub fn is_valid(&self) -> bool {
        self.server_time > 0
    }
}

/// Response from the /api/v3/ticker/price endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerPrice {
    /// Trading pair symbol (e.g., "BTCUSDT")
    pub symbol: String,
    /// Current price as string to preserve precision
    pub price: String,
}

/// One candlestick row from /api/v3/klines or /fapi/v1/klines
///
/// The API encodes each kline as a heterogeneous JSON array; the trailing
/// "ignore" element is dropped on decode. Prices and volumes stay strings to
/// preserve precision.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "KlineRow")]
pub struct Kline {
    pub open_time: i64,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: String,
    pub close_time: i64,
    pub quote_asset_volume: String,
    pub number_of_trades: u64,
    pub taker_buy_base_asset_volume: String,
    pub taker_buy_quote_asset_volume: String,
}

type KlineRow = (
    i64,
    String,
    String,
    String,
    String,
    String,
    i64,
    String,
    u64,
    String,
    String,
    serde_json::Value,
);

impl From<KlineRow> for Kline {
    fn from(row: KlineRow) -> Self {
        Kline {
            open_time: row.0,
            open: row.1,
            high: row.2,
            low: row.3,
            close: row.4,
            volume: row.5,
            close_time: row.6,
            quote_asset_volume: row.7,
            number_of_trades: row.8,
            taker_buy_base_asset_volume: row.9,
            taker_buy_quote_asset_volume: row.10,
        }
    }
}

/// An order as returned by /api/v3/openOrders
///
/// Only the commonly consumed fields are typed; unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub symbol: String,
    pub order_id: i64,
    pub client_order_id: String,
    pub price: String,
    pub orig_qty: String,
    pub executed_qty: String,
    pub status: String,
    #[serde(rename = "type")]
    pub order_type: String,
    pub side: String,
}

/// One entry of the /fapi/v1/leverageBracket response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolBrackets {
    pub symbol: String,
    pub brackets: Vec<LeverageBracket>,
}

/// A single leverage bracket
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeverageBracket {
    pub bracket: u32,
    pub initial_leverage: u32,
}
