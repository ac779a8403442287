//! Binance REST API client
//!
//! Thin async wrappers over Binance's Spot, Margin, Futures and public
//! market-data endpoints, sharing one signing routine and one proxy-aware
//! HTTP session per host. Request and response shapes are Binance's own and
//! pass through unmodified.
//!
//! ```no_run
//! use binance_client::{Binance, OrderSide, SpotOrderRequest};
//!
//! # async fn example() -> binance_client::Result<()> {
//! let client = Binance::builder()
//!     .credentials("api-key", "api-secret")
//!     .testnet(true)
//!     .build()?;
//!
//! let time = client.market.server_time().await?;
//! println!("server time: {time}");
//!
//! let order = SpotOrderRequest::limit("BTCUSDT", OrderSide::Buy, "0.001", "35000");
//! let ack = client.spot.place_order(&order).await?;
//! println!("{ack}");
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod sign;
pub mod transport;

pub use api::{
    FuturesApi, FuturesOrderRequest, Kline, KlinesQuery, MarginApi, MarginOrderRequest,
    MarginType, Market, MarketApi, Order, OrderSide, OrderType, ServerTimeResponse,
    SideEffectType, SpotApi, SpotOrderRequest, TickerPrice, TimeInForce,
};
pub use client::{Binance, BinanceBuilder};
pub use config::{Credentials, Endpoints, ProxyConfig, SecretString};
pub use error::{BinanceError, Result};
