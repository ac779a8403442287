//! Margin trading endpoints
//!
//! Cross and isolated margin: account state, order placement and loan
//! repayment. Isolated-margin calls are keyed by symbol.

use crate::api::enums::{OrderSide, OrderType, SideEffectType};
use crate::error::{BinanceError, Result};
use crate::sign::Params;
use crate::transport::Session;
use reqwest::Method;
use serde_json::Value;
use tracing::info;

/// Binance encodes the isolated flag as an uppercase string
fn isolated_flag(isolated: bool) -> &'static str {
    if isolated {
        "TRUE"
    } else {
        "FALSE"
    }
}

/// A margin order (MARKET or LIMIT), cross by default
#[derive(Debug, Clone)]
pub struct MarginOrderRequest {
    symbol: String,
    side: OrderSide,
    order_type: OrderType,
    quantity: String,
    price: Option<String>,
    isolated: bool,
    side_effect_type: SideEffectType,
}

impl MarginOrderRequest {
    /// MARKET margin order
    pub fn market(symbol: impl Into<String>, side: OrderSide, quantity: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Market,
            quantity: quantity.into(),
            price: None,
            isolated: false,
            side_effect_type: SideEffectType::default(),
        }
    }

    /// LIMIT margin order
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
            isolated: false,
            side_effect_type: SideEffectType::default(),
        }
    }

    /// Switches the order to isolated margin
    pub fn isolated(mut self, isolated: bool) -> Self {
        self.isolated = isolated;
        self
    }

    /// Borrow/repay side effect (e.g. MARGIN_BUY, AUTO_REPAY)
    pub fn side_effect(mut self, side_effect_type: SideEffectType) -> Self {
        self.side_effect_type = side_effect_type;
        self
    }

    pub(crate) fn params(&self) -> Params {
        let mut params = Params::new()
            .with("symbol", &self.symbol)
            .with("side", self.side.as_str())
            .with("type", self.order_type.as_str())
            .with("quantity", &self.quantity)
            .with("sideEffectType", self.side_effect_type.as_str())
            .with("isIsolated", isolated_flag(self.isolated));

        if self.order_type == OrderType::Limit {
            if let Some(price) = &self.price {
                params.push("price", price);
            }
        }

        params
    }
}

/// Margin trading API
#[derive(Clone, Debug)]
pub struct MarginApi {
    session: Session,
}

impl MarginApi {
    pub(crate) fn new(session: Session) -> Self {
        Self { session }
    }

    /// Margin account state
    ///
    /// Cross margin: GET /sapi/v1/margin/account. Isolated margin: GET
    /// /sapi/v1/margin/isolated/account, which requires a symbol.
    pub async fn account(&self, isolated: bool, symbol: Option<&str>) -> Result<Value> {
        let (path, params) = if isolated {
            let symbol = symbol.ok_or_else(|| {
                BinanceError::configuration("Isolated margin account requires a symbol")
            })?;
            (
                "/sapi/v1/margin/isolated/account",
                Params::new().with("symbols", symbol),
            )
        } else {
            ("/sapi/v1/margin/account", Params::new())
        };

        let (_, body) = self.session.send(Method::GET, path, params, true).await?;
        Ok(body)
    }

    /// POST /sapi/v1/margin/order - places a margin order
    pub async fn place_order(&self, order: &MarginOrderRequest) -> Result<Value> {
        let (_, body) = self
            .session
            .send(Method::POST, "/sapi/v1/margin/order", order.params(), true)
            .await?;
        info!(
            symbol = %order.symbol,
            isolated = order.isolated,
            "margin order placed"
        );
        Ok(body)
    }

    /// POST /sapi/v1/margin/repay - repays a margin loan
    pub async fn repay_loan(
        &self,
        symbol: &str,
        asset: &str,
        amount: &str,
        isolated: bool,
    ) -> Result<Value> {
        let params = Params::new()
            .with("symbol", symbol)
            .with("asset", asset)
            .with("amount", amount)
            .with("isIsolated", isolated_flag(isolated));
        let (_, body) = self
            .session
            .send(Method::POST, "/sapi/v1/margin/repay", params, true)
            .await?;
        Ok(body)
    }
}
