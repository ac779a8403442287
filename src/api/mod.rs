//! Domain wrappers over the shared transport
//!
//! One module per API surface: public market data, Spot, Margin and USD-M
//! Futures. Each wrapper maps endpoints to methods with explicit parameter
//! sets and passes the transport's result through unchanged.

pub mod enums;
pub mod futures;
pub mod margin;
pub mod market;
pub mod spot;
pub mod types;

// Re-export commonly used types
pub use enums::{MarginType, OrderSide, OrderType, SideEffectType, TimeInForce};
pub use futures::{FuturesApi, FuturesOrderRequest};
pub use margin::{MarginApi, MarginOrderRequest};
pub use market::{KlinesQuery, Market, MarketApi};
pub use spot::{SpotApi, SpotOrderRequest};
pub use types::{Kline, Order, ServerTimeResponse, TickerPrice};
