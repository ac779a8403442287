//! API Credential Management
//!
//! Secure handling of Binance API credentials. Credentials are never logged
//! and are masked when displayed.

use crate::error::{BinanceError, Result};
use std::fmt;

/// Secure string wrapper that masks sensitive data in logs
///
/// Wraps sensitive strings (API keys, secrets) so they are never accidentally
/// exposed in logs or error messages. Debug output shows only
/// `SecretString(***)` and Display shows the truncated form `first4...last4`.
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        SecretString(value.into())
    }

    /// Returns a reference to the inner string
    ///
    /// Only use this where the raw value is actually needed (header values,
    /// HMAC keys). Never log the returned value.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Returns a masked version of the secret for safe logging
    pub fn masked(&self) -> String {
        let s = &self.0;
        if s.len() <= 8 {
            return "***".to_string();
        }
        format!("{}...{}", &s[..4], &s[s.len() - 4..])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretString(***)")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        SecretString::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        SecretString::new(s)
    }
}

/// Binance API credentials
///
/// The API key is sent as the `X-MBX-APIKEY` header on private calls; the
/// secret key is only ever used as the HMAC signing key and never leaves the
/// process. Immutable for the lifetime of a client.
#[derive(Clone, Debug)]
pub struct Credentials {
    /// Binance API key (public identifier)
    pub api_key: SecretString,
    /// Binance secret key (private signing key)
    pub secret_key: SecretString,
}

impl Credentials {
    pub fn new(api_key: impl Into<SecretString>, secret_key: impl Into<SecretString>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Loads credentials from `BINANCE_API_KEY` / `BINANCE_SECRET_KEY`
    ///
    /// Trims whitespace and validates non-empty.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("BINANCE_API_KEY")
            .map_err(|_| BinanceError::configuration("BINANCE_API_KEY not set"))?;
        let secret_key = std::env::var("BINANCE_SECRET_KEY")
            .map_err(|_| BinanceError::configuration("BINANCE_SECRET_KEY not set"))?;

        let api_key = api_key.trim().to_string();
        let secret_key = secret_key.trim().to_string();

        if api_key.is_empty() {
            return Err(BinanceError::configuration(
                "BINANCE_API_KEY is empty after trimming whitespace",
            ));
        }
        if secret_key.is_empty() {
            return Err(BinanceError::configuration(
                "BINANCE_SECRET_KEY is empty after trimming whitespace",
            ));
        }

        Ok(Self::new(api_key, secret_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_output_is_masked() {
        let secret = SecretString::new("abcdefghijklmnopqrstuvwxyz");
        assert_eq!(format!("{:?}", secret), "SecretString(***)");
        assert_eq!(secret.to_string(), "abcd...wxyz");
    }

    #[test]
    fn test_short_secrets_fully_masked() {
        let secret = SecretString::new("abcdefgh");
        assert_eq!(secret.masked(), "***");
    }

    #[test]
    fn test_credentials_debug_never_contains_raw_values() {
        let creds = Credentials::new("my-api-key-value", "my-secret-key-value");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("my-api-key-value"));
        assert!(!debug.contains("my-secret-key-value"));
    }
}
