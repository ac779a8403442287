//! Order parameter enums
//!
//! Wire values are Binance's uppercase constants; `as_str` yields exactly
//! what goes into the query string.

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderSide::Buy => "BUY",
            OrderSide::Sell => "SELL",
        }
    }
}

/// Spot / Margin order type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderType {
    Market,
    Limit,
    LimitMaker,
}

impl OrderType {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderType::Market => "MARKET",
            OrderType::Limit => "LIMIT",
            OrderType::LimitMaker => "LIMIT_MAKER",
        }
    }
}

/// Time in force for limit orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeInForce {
    #[default]
    Gtc,
    Ioc,
    Fok,
}

impl TimeInForce {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeInForce::Gtc => "GTC",
            TimeInForce::Ioc => "IOC",
            TimeInForce::Fok => "FOK",
        }
    }
}

/// Margin order side effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SideEffectType {
    #[default]
    NoSideEffect,
    MarginBuy,
    AutoRepay,
}

impl SideEffectType {
    pub fn as_str(self) -> &'static str {
        match self {
            SideEffectType::NoSideEffect => "NO_SIDE_EFFECT",
            SideEffectType::MarginBuy => "MARGIN_BUY",
            SideEffectType::AutoRepay => "AUTO_REPAY",
        }
    }
}

/// Futures margin type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarginType {
    Isolated,
    Crossed,
}

impl MarginType {
    pub fn as_str(self) -> &'static str {
        match self {
            MarginType::Isolated => "ISOLATED",
            MarginType::Crossed => "CROSSED",
        }
    }
}
