//! USD-M Futures endpoints
//!
//! Account and position queries, order placement with optional leverage and
//! stop handling, margin-type and leverage management.

use crate::api::enums::{MarginType, OrderSide, OrderType};
use crate::api::types::SymbolBrackets;
use crate::error::Result;
use crate::sign::Params;
use crate::transport::Session;
use reqwest::Method;
use serde_json::Value;
use tracing::info;

/// Formats a quantity to at most 8 decimal places, trailing zeros trimmed
fn format_quantity(quantity: f64) -> String {
    let s = format!("{:.8}", quantity);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// A futures order
///
/// A stop-loss or take-profit price turns the order into a
/// STOP_LOSS_LIMIT / TAKE_PROFIT_LIMIT order around that trigger; when both
/// are given the take-profit wins. An attached leverage is applied to the
/// symbol before the order goes out.
#[derive(Debug, Clone)]
pub struct FuturesOrderRequest {
    symbol: String,
    side: OrderSide,
    order_type: OrderType,
    quantity: String,
    price: Option<String>,
    leverage: Option<u32>,
    stop_loss: Option<String>,
    take_profit: Option<String>,
}

impl FuturesOrderRequest {
    /// MARKET futures order
    pub fn market(symbol: impl Into<String>, side: OrderSide, quantity: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Market,
            quantity: quantity.into(),
            price: None,
            leverage: None,
            stop_loss: None,
            take_profit: None,
        }
    }

    /// LIMIT futures order (GTC)
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
            leverage: None,
            stop_loss: None,
            take_profit: None,
        }
    }

    /// Leverage to apply to the symbol before placing the order
    pub fn leverage(mut self, leverage: u32) -> Self {
        self.leverage = Some(leverage);
        self
    }

    pub fn stop_loss(mut self, stop_price: impl Into<String>) -> Self {
        self.stop_loss = Some(stop_price.into());
        self
    }

    pub fn take_profit(mut self, stop_price: impl Into<String>) -> Self {
        self.take_profit = Some(stop_price.into());
        self
    }

    /// The order type actually sent, after stop handling
    fn effective_type(&self) -> &'static str {
        if self.take_profit.is_some() {
            "TAKE_PROFIT_LIMIT"
        } else if self.stop_loss.is_some() {
            "STOP_LOSS_LIMIT"
        } else {
            self.order_type.as_str()
        }
    }

    fn stop_price(&self) -> Option<&str> {
        self.take_profit
            .as_deref()
            .or(self.stop_loss.as_deref())
    }

    pub(crate) fn params(&self) -> Params {
        let mut params = Params::new()
            .with("symbol", &self.symbol)
            .with("side", self.side.as_str())
            .with("type", self.effective_type())
            .with("quantity", &self.quantity);

        if self.order_type == OrderType::Limit {
            if let Some(price) = &self.price {
                params.push("price", price);
            }
        }
        if let Some(stop_price) = self.stop_price() {
            params.push("stopPrice", stop_price);
        }
        if self.order_type == OrderType::Limit || self.stop_price().is_some() {
            params.push("timeInForce", "GTC");
        }

        params
    }
}

/// Futures trading API
#[derive(Clone, Debug)]
pub struct FuturesApi {
    session: Session,
}

impl FuturesApi {
    pub(crate) fn new(session: Session) -> Self {
        Self { session }
    }

    /// GET /fapi/v1/exchangeInfo - symbols and trading rules (public)
    pub async fn exchange_info(&self) -> Result<Value> {
        let (_, body) = self
            .session
            .send(Method::GET, "/fapi/v1/exchangeInfo", Params::new(), false)
            .await?;
        Ok(body)
    }

    /// GET /fapi/v2/account - balances and positions
    pub async fn account(&self) -> Result<Value> {
        let (_, body) = self
            .session
            .send(Method::GET, "/fapi/v2/account", Params::new(), true)
            .await?;
        Ok(body)
    }

    /// GET /fapi/v2/positionRisk - position details
    ///
    /// With a symbol: that symbol's positions. Without: every open position
    /// on the account.
    pub async fn position_information(&self, symbol: Option<&str>) -> Result<Value> {
        let mut params = Params::new();
        if let Some(symbol) = symbol {
            params.push("symbol", symbol);
        }
        let (_, body) = self
            .session
            .send(Method::GET, "/fapi/v2/positionRisk", params, true)
            .await?;
        Ok(body)
    }

    /// POST /fapi/v1/order - places a futures order
    ///
    /// Applies the request's leverage to the symbol first, when one is set.
    pub async fn place_order(&self, order: &FuturesOrderRequest) -> Result<Value> {
        if let Some(leverage) = order.leverage {
            self.set_leverage(&order.symbol, leverage).await?;
        }

        let (_, body) = self
            .session
            .send(Method::POST, "/fapi/v1/order", order.params(), true)
            .await?;
        info!(
            symbol = %order.symbol,
            side = order.side.as_str(),
            order_type = order.effective_type(),
            "futures order placed"
        );
        Ok(body)
    }

    /// Closes a position with a reduce-only MARKET order
    pub async fn close_position(
        &self,
        symbol: &str,
        side: OrderSide,
        quantity: f64,
    ) -> Result<Value> {
        let params = Params::new()
            .with("symbol", symbol)
            .with("side", side.as_str())
            .with("type", "MARKET")
            .with("reduceOnly", "true")
            .with("quantity", format_quantity(quantity));
        let (_, body) = self
            .session
            .send(Method::POST, "/fapi/v1/order", params, true)
            .await?;
        info!(symbol, "futures position closed");
        Ok(body)
    }

    /// POST /fapi/v1/leverage - sets leverage for a symbol
    pub async fn set_leverage(&self, symbol: &str, leverage: u32) -> Result<Value> {
        let params = Params::new()
            .with("symbol", symbol)
            .with("leverage", leverage);
        let (_, body) = self
            .session
            .send(Method::POST, "/fapi/v1/leverage", params, true)
            .await?;
        Ok(body)
    }

    /// POST /fapi/v1/marginType - ISOLATED or CROSSED
    pub async fn set_margin_type(&self, symbol: &str, margin_type: MarginType) -> Result<Value> {
        let params = Params::new()
            .with("symbol", symbol)
            .with("marginType", margin_type.as_str());
        let (_, body) = self
            .session
            .send(Method::POST, "/fapi/v1/marginType", params, true)
            .await?;
        Ok(body)
    }

    /// Maximum leverage available for a symbol
    ///
    /// GET /fapi/v1/leverageBracket; the first bracket carries the highest
    /// leverage. `None` when the symbol is absent from the response.
    pub async fn max_leverage(&self, symbol: &str) -> Result<Option<u32>> {
        let params = Params::new().with("symbol", symbol);
        let brackets: Vec<SymbolBrackets> = self
            .session
            .fetch(Method::GET, "/fapi/v1/leverageBracket", params, true)
            .await?;

        Ok(brackets
            .iter()
            .find(|entry| entry.symbol == symbol)
            .and_then(|entry| entry.brackets.first())
            .map(|bracket| bracket.initial_leverage))
    }
}
