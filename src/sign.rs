//! Request signing
//!
//! Canonical query-string construction and HMAC-SHA256 signing for private
//! endpoints. Binance verifies the signature against the query string exactly
//! as transmitted, so `Params` preserves insertion order and the signed string
//! is the wire string by construction.

use crate::error::{BinanceError, Result};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Ordered request parameters
///
/// A thin wrapper over an insertion-ordered key/value list. Values are
/// URL-encoded once, at `encode` time.
#[derive(Debug, Clone, Default)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter, preserving insertion order
    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) {
        self.0.push((key.into(), value.to_string()));
    }

    /// Builder-style `push`
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.push(key, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Encodes the parameters as a query string in insertion order
    pub fn encode(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// A query string ready for dispatch, with the timestamp that was signed
#[derive(Debug, Clone)]
pub struct SignedQuery {
    /// Full query string, `signature` appended last
    pub query: String,
    /// Millisecond timestamp embedded in the query
    pub timestamp: i64,
}

/// Current time in milliseconds since the Unix epoch
pub fn timestamp_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Computes the lowercase hex HMAC-SHA256 digest of `payload`
///
/// # Errors
/// Returns `Configuration` if the secret is empty; an empty key would
/// silently produce a valid-looking but useless signature.
pub fn hmac_sha256_hex(payload: &str, secret: &str) -> Result<String> {
    if secret.is_empty() {
        return Err(BinanceError::configuration("API secret is empty"));
    }

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| BinanceError::configuration(format!("Invalid secret key: {}", e)))?;
    mac.update(payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Signs `params` for a private endpoint call
///
/// Appends `recvWindow` (when configured) and `timestamp`, signs the encoded
/// query, and appends the signature last.
pub fn signed_query(params: Params, secret: &str, recv_window: Option<u64>) -> Result<SignedQuery> {
    sign_with_timestamp(params, secret, recv_window, timestamp_ms())
}

/// Signing with an explicit timestamp; deterministic for a fixed timestamp
pub fn sign_with_timestamp(
    mut params: Params,
    secret: &str,
    recv_window: Option<u64>,
    timestamp: i64,
) -> Result<SignedQuery> {
    if let Some(window) = recv_window {
        params.push("recvWindow", window);
    }
    params.push("timestamp", timestamp);

    let canonical = params.encode();
    let signature = hmac_sha256_hex(&canonical, secret)?;

    Ok(SignedQuery {
        query: format!("{}&signature={}", canonical, signature),
        timestamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Signing example from the Binance API documentation
    const DOC_SECRET: &str = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";
    const DOC_QUERY: &str = "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC\
                             &quantity=1&price=0.1&recvWindow=5000&timestamp=1499827319559";
    const DOC_SIGNATURE: &str = "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71";

    #[test]
    fn test_documented_signature_vector() {
        let signature = hmac_sha256_hex(DOC_QUERY, DOC_SECRET).unwrap();
        assert_eq!(signature, DOC_SIGNATURE);
    }

    #[test]
    fn test_signed_query_matches_documented_vector() {
        let params = Params::new()
            .with("symbol", "LTCBTC")
            .with("side", "BUY")
            .with("type", "LIMIT")
            .with("timeInForce", "GTC")
            .with("quantity", 1)
            .with("price", 0.1);

        let signed = sign_with_timestamp(params, DOC_SECRET, Some(5000), 1499827319559).unwrap();
        assert_eq!(
            signed.query,
            format!("{}&signature={}", DOC_QUERY, DOC_SIGNATURE)
        );
        assert_eq!(signed.timestamp, 1499827319559);
    }

    #[test]
    fn test_signing_is_deterministic() {
        let params = || Params::new().with("symbol", "BTCUSDT").with("side", "SELL");
        let a = sign_with_timestamp(params(), "secret", None, 1700000000000).unwrap();
        let b = sign_with_timestamp(params(), "secret", None, 1700000000000).unwrap();
        assert_eq!(a.query, b.query);
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        let err = hmac_sha256_hex("timestamp=1", "").unwrap_err();
        assert_eq!(err.error_type(), "configuration");

        let err = sign_with_timestamp(Params::new(), "", None, 1).unwrap_err();
        assert_eq!(err.error_type(), "configuration");
    }

    #[test]
    fn test_encode_preserves_insertion_order() {
        let params = Params::new()
            .with("zeta", 1)
            .with("alpha", 2)
            .with("mid", "a b");
        assert_eq!(params.encode(), "zeta=1&alpha=2&mid=a%20b");
    }

    #[test]
    fn test_signature_is_appended_last() {
        let params = Params::new().with("symbol", "BTCUSDT");
        let signed = signed_query(params, "secret", Some(5000)).unwrap();
        let signature_pos = signed.query.find("&signature=").unwrap();
        assert_eq!(
            signed.query[signature_pos + 1..].matches('&').count(),
            0,
            "nothing may follow the signature"
        );
        assert!(signed.query.contains("recvWindow=5000&timestamp="));
    }
}
