//! Public market data endpoints
//!
//! No credentials involved: these calls are dispatched unsigned and carry no
//! API-key header.

use crate::api::types::{Kline, ServerTimeResponse, TickerPrice};
use crate::error::Result;
use crate::sign::{self, Params};
use crate::transport::Session;
use reqwest::Method;
use std::time::Duration;
use tracing::debug;

/// Hard cap Binance puts on a single klines request
const MAX_KLINE_LIMIT: u32 = 1000;

/// Which venue a market-data call targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Market {
    Spot,
    Futures,
}

/// Query for kline (candlestick) data
#[derive(Debug, Clone)]
pub struct KlinesQuery {
    pub symbol: String,
    pub interval: String,
    pub limit: Option<u32>,
    pub end_time: Option<i64>,
}

impl KlinesQuery {
    pub fn new(symbol: impl Into<String>, interval: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            interval: interval.into(),
            limit: None,
            end_time: None,
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Only klines opening at or before this millisecond timestamp
    pub fn end_time(mut self, end_time: i64) -> Self {
        self.end_time = Some(end_time);
        self
    }
}

/// Public market-data API
#[derive(Clone, Debug)]
pub struct MarketApi {
    spot: Session,
    futures: Session,
}

impl MarketApi {
    pub(crate) fn new(spot: Session, futures: Session) -> Self {
        Self { spot, futures }
    }

    /// Base URL of the spot host
    pub fn spot_base(&self) -> &url::Url {
        self.spot.base_url()
    }

    /// Base URL of the futures host
    pub fn futures_base(&self) -> &url::Url {
        self.futures.base_url()
    }

    fn session(&self, market: Market) -> &Session {
        match market {
            Market::Spot => &self.spot,
            Market::Futures => &self.futures,
        }
    }

    fn klines_path(market: Market) -> &'static str {
        match market {
            Market::Spot => "/api/v3/klines",
            Market::Futures => "/fapi/v1/klines",
        }
    }

    /// GET /api/v3/ping - connectivity check
    pub async fn ping(&self) -> Result<()> {
        self.spot
            .send(Method::GET, "/api/v3/ping", Params::new(), false)
            .await?;
        Ok(())
    }

    /// GET /api/v3/time - current server time in milliseconds
    pub async fn server_time(&self) -> Result<i64> {
        let response: ServerTimeResponse = self
            .spot
            .fetch(Method::GET, "/api/v3/time", Params::new(), false)
            .await?;
        Ok(response.server_time)
    }

    /// GET /api/v3/ticker/price - latest price for a symbol
    pub async fn ticker_price(&self, symbol: &str) -> Result<TickerPrice> {
        let params = Params::new().with("symbol", symbol);
        self.spot
            .fetch(Method::GET, "/api/v3/ticker/price", params, false)
            .await
    }

    /// GET /api/v3/klines or /fapi/v1/klines - candlestick data
    pub async fn klines(&self, market: Market, query: &KlinesQuery) -> Result<Vec<Kline>> {
        let mut params = Params::new()
            .with("symbol", &query.symbol)
            .with("interval", &query.interval);
        if let Some(limit) = query.limit {
            params.push("limit", limit);
        }
        if let Some(end_time) = query.end_time {
            params.push("endTime", end_time);
        }
        self.session(market)
            .fetch(Method::GET, Self::klines_path(market), params, false)
            .await
    }

    /// Fetches more klines than a single request allows
    ///
    /// Pages backwards through `endTime` in chunks of up to 1000 rows until
    /// `total` rows are collected or history runs out, pausing briefly
    /// between pages. Rows are returned oldest-first.
    pub async fn klines_extended(
        &self,
        market: Market,
        query: &KlinesQuery,
        total: u32,
    ) -> Result<Vec<Kline>> {
        let mut remaining = total;
        let mut end_time = query.end_time.unwrap_or_else(sign::timestamp_ms);
        let mut pages: Vec<Vec<Kline>> = Vec::new();

        while remaining > 0 {
            let chunk = remaining.min(MAX_KLINE_LIMIT);
            let page_query = KlinesQuery::new(query.symbol.as_str(), query.interval.as_str())
                .limit(chunk)
                .end_time(end_time);
            let page = self.klines(market, &page_query).await?;
            if page.is_empty() {
                break;
            }

            debug!(
                symbol = %query.symbol,
                rows = page.len(),
                end_time,
                "fetched kline page"
            );

            end_time = page[0].open_time - 1;
            let exhausted = (page.len() as u32) < chunk;
            pages.push(page);
            remaining = remaining.saturating_sub(chunk);

            if exhausted {
                break;
            }
            if remaining > MAX_KLINE_LIMIT {
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
        }

        // pages were fetched newest-to-oldest; flatten back to oldest-first
        Ok(pages.into_iter().rev().flatten().collect())
    }
}
