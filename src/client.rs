//! Client facade
//!
//! `Binance` aggregates the domain wrappers behind one explicitly
//! constructed object. There is no process-wide default instance: several
//! differently configured clients (say, one testnet and one mainnet) can
//! coexist, and a client can be cloned and shared across tasks freely.

use crate::api::{FuturesApi, MarginApi, MarketApi, SpotApi};
use crate::config::{Credentials, Endpoints, ProxyConfig};
use crate::error::Result;
use crate::transport::{self, Session};
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Entry point for all API surfaces
#[derive(Clone, Debug)]
pub struct Binance {
    /// Public market data (unauthenticated)
    pub market: MarketApi,
    /// Spot trading
    pub spot: SpotApi,
    /// Margin trading
    pub margin: MarginApi,
    /// USD-M Futures
    pub futures: FuturesApi,
}

impl Binance {
    /// Client with credentials against mainnet, default timeout, no proxy
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Result<Self> {
        Self::builder()
            .credentials(api_key.into(), api_secret.into())
            .build()
    }

    /// Credential-less client for public market data only
    pub fn public() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> BinanceBuilder {
        BinanceBuilder::default()
    }
}

/// Builder for [`Binance`]
///
/// Everything set here is immutable once `build` returns.
#[derive(Debug, Default)]
pub struct BinanceBuilder {
    credentials: Option<Credentials>,
    testnet: bool,
    proxy: Option<ProxyConfig>,
    timeout: Option<Duration>,
    recv_window: Option<u64>,
    endpoints: Option<Endpoints>,
}

impl BinanceBuilder {
    /// API key and secret for private endpoints
    pub fn credentials(mut self, api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::new(api_key.into(), api_secret.into()));
        self
    }

    /// Loads credentials from `BINANCE_API_KEY` / `BINANCE_SECRET_KEY`
    pub fn credentials_from_env(mut self) -> Result<Self> {
        self.credentials = Some(Credentials::from_env()?);
        Ok(self)
    }

    /// Targets the testnet deployment instead of mainnet
    ///
    /// Changes only the base URLs; signing and proxy behavior are identical
    /// on both networks.
    pub fn testnet(mut self, testnet: bool) -> Self {
        self.testnet = testnet;
        self
    }

    /// Routes every request through the given proxy
    pub fn proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Per-request timeout (default: 10 seconds)
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn timeout_ms(self, timeout_ms: u64) -> Self {
        self.timeout(Duration::from_millis(timeout_ms))
    }

    /// `recvWindow` tolerance attached to every signed request
    pub fn recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = Some(recv_window);
        self
    }

    /// Overrides the base URLs resolved from the testnet flag
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = Some(endpoints);
        self
    }

    pub fn build(self) -> Result<Binance> {
        let endpoints = self
            .endpoints
            .unwrap_or_else(|| Endpoints::for_network(self.testnet));
        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);

        let http = transport::build_http_client(timeout, self.proxy.as_ref())?;

        let spot_session = Session::new(
            http.clone(),
            endpoints.spot,
            self.credentials.clone(),
            self.recv_window,
        );
        let futures_session = Session::new(
            http,
            endpoints.futures,
            self.credentials,
            self.recv_window,
        );

        Ok(Binance {
            market: MarketApi::new(spot_session.clone(), futures_session.clone()),
            spot: SpotApi::new(spot_session.clone()),
            margin: MarginApi::new(spot_session),
            futures: FuturesApi::new(futures_session),
        })
    }
}
