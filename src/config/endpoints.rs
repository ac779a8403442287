//! Base URL pairs for mainnet and testnet
//!
//! Spot and Margin share one host; Futures lives on its own. The pair is
//! fixed at client construction by the `testnet` flag, with a custom
//! override for pointing tests at a local mock server.

use crate::error::{BinanceError, Result};
use url::Url;

pub const MAINNET_SPOT: &str = "https://api.binance.com";
pub const MAINNET_FUTURES: &str = "https://fapi.binance.com";
pub const TESTNET_SPOT: &str = "https://testnet.binance.vision";
pub const TESTNET_FUTURES: &str = "https://testnet.binancefuture.com";

/// Resolved base URLs for one deployment of the API
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Spot and Margin REST host
    pub spot: Url,
    /// USD-M Futures REST host
    pub futures: Url,
}

impl Endpoints {
    pub fn mainnet() -> Self {
        Self {
            spot: Url::parse(MAINNET_SPOT).expect("mainnet spot URL is valid"),
            futures: Url::parse(MAINNET_FUTURES).expect("mainnet futures URL is valid"),
        }
    }

    pub fn testnet() -> Self {
        Self {
            spot: Url::parse(TESTNET_SPOT).expect("testnet spot URL is valid"),
            futures: Url::parse(TESTNET_FUTURES).expect("testnet futures URL is valid"),
        }
    }

    pub fn for_network(testnet: bool) -> Self {
        if testnet {
            Self::testnet()
        } else {
            Self::mainnet()
        }
    }

    /// Custom hosts, e.g. a mock server in tests
    pub fn custom(spot: &str, futures: &str) -> Result<Self> {
        Ok(Self {
            spot: Url::parse(spot)
                .map_err(|e| BinanceError::configuration(format!("Invalid spot URL: {}", e)))?,
            futures: Url::parse(futures)
                .map_err(|e| BinanceError::configuration(format!("Invalid futures URL: {}", e)))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_testnet_flag_selects_hosts() {
        let mainnet = Endpoints::for_network(false);
        assert_eq!(mainnet.spot.as_str(), "https://api.binance.com/");
        assert_eq!(mainnet.futures.as_str(), "https://fapi.binance.com/");

        let testnet = Endpoints::for_network(true);
        assert_eq!(testnet.spot.as_str(), "https://testnet.binance.vision/");
        assert_eq!(testnet.futures.as_str(), "https://testnet.binancefuture.com/");
    }

    #[test]
    fn test_custom_rejects_garbage() {
        let err = Endpoints::custom("not a url", MAINNET_FUTURES).unwrap_err();
        assert_eq!(err.error_type(), "configuration");
    }
}
