//! Spot trading endpoints
//!
//! Order placement (market, limit, limit-maker), cancellation and open-order
//! queries. All calls here are private and go out signed.

use crate::api::enums::{OrderSide, OrderType, TimeInForce};
use crate::api::types::Order;
use crate::error::Result;
use crate::sign::Params;
use crate::transport::Session;
use reqwest::Method;
use serde_json::Value;
use tracing::info;

/// A spot order, assembled through the per-type constructors
///
/// The constructors make invalid parameter sets unrepresentable: a price can
/// only be attached to the limit variants, `timeInForce` only applies to
/// plain limit orders.
#[derive(Debug, Clone)]
pub struct SpotOrderRequest {
    symbol: String,
    side: OrderSide,
    order_type: OrderType,
    quantity: String,
    price: Option<String>,
    time_in_force: TimeInForce,
}

impl SpotOrderRequest {
    /// MARKET order
    pub fn market(symbol: impl Into<String>, side: OrderSide, quantity: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Market,
            quantity: quantity.into(),
            price: None,
            time_in_force: TimeInForce::default(),
        }
    }

    /// LIMIT order, GTC unless overridden with [`time_in_force`](Self::time_in_force)
    pub fn limit(
        symbol: impl Into<String>,
        side: OrderSide,
        quantity: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Limit,
            quantity: quantity.into(),
            price: Some(price.into()),
            time_in_force: TimeInForce::default(),
        }
    }

    /// LIMIT_MAKER order (rejected by the exchange if it would take)
    pub fn limit_maker(
        symbol: impl Into<String>,
        side: OrderSide,
        quantity: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::LimitMaker,
            quantity: quantity.into(),
            price: Some(price.into()),
            time_in_force: TimeInForce::default(),
        }
    }

    pub fn time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = time_in_force;
        self
    }

    pub(crate) fn params(&self) -> Params {
        let mut params = Params::new()
            .with("symbol", &self.symbol)
            .with("side", self.side.as_str())
            .with("type", self.order_type.as_str());

        match self.order_type {
            OrderType::Limit => {
                params.push("timeInForce", self.time_in_force.as_str());
                if let Some(price) = &self.price {
                    params.push("price", price);
                }
                params.push("quantity", &self.quantity);
            }
            OrderType::LimitMaker => {
                if let Some(price) = &self.price {
                    params.push("price", price);
                }
                params.push("quantity", &self.quantity);
            }
            OrderType::Market => {
                params.push("quantity", &self.quantity);
            }
        }

        params
    }
}

/// Spot trading API
#[derive(Clone, Debug)]
pub struct SpotApi {
    session: Session,
}

impl SpotApi {
    pub(crate) fn new(session: Session) -> Self {
        Self { session }
    }

    /// POST /api/v3/order - places a spot order
    ///
    /// The response shape depends on the account's configured response type
    /// (ACK, RESULT or FULL) and is passed through unchanged.
    pub async fn place_order(&self, order: &SpotOrderRequest) -> Result<Value> {
        let (_, body) = self
            .session
            .send(Method::POST, "/api/v3/order", order.params(), true)
            .await?;
        info!(symbol = %order.symbol, side = order.side.as_str(), "spot order placed");
        Ok(body)
    }

    /// DELETE /api/v3/order - cancels an order by id
    pub async fn cancel_order(&self, symbol: &str, order_id: i64) -> Result<Value> {
        let params = Params::new()
            .with("symbol", symbol)
            .with("orderId", order_id);
        let (_, body) = self
            .session
            .send(Method::DELETE, "/api/v3/order", params, true)
            .await?;
        Ok(body)
    }

    /// GET /api/v3/openOrders - open orders for a symbol
    pub async fn open_orders(&self, symbol: &str) -> Result<Vec<Order>> {
        let params = Params::new().with("symbol", symbol);
        self.session
            .fetch(Method::GET, "/api/v3/openOrders", params, true)
            .await
    }

    /// Cancels every open order for a symbol, one by one
    ///
    /// Returns the orders that were cancelled. A failing cancel aborts and
    /// surfaces the underlying error.
    pub async fn cancel_all_orders(&self, symbol: &str) -> Result<Vec<Order>> {
        let open_orders = self.open_orders(symbol).await?;
        for order in &open_orders {
            self.cancel_order(symbol, order.order_id).await?;
        }
        info!(symbol, count = open_orders.len(), "open spot orders cancelled");
        Ok(open_orders)
    }

    /// GET /api/v3/account - account balances and permissions
    pub async fn account(&self) -> Result<Value> {
        let (_, body) = self
            .session
            .send(Method::GET, "/api/v3/account", Params::new(), true)
            .await?;
        Ok(body)
    }
}
