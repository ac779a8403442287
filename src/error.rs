use thiserror::Error;

/// Main error type for the Binance client
///
/// Every failure surfaces as one of these variants so callers can branch on
/// cause. Underlying errors are carried as sources, never replaced.
#[derive(Error, Debug)]
pub enum BinanceError {
    /// Bad or missing client configuration (credentials, proxy, parameters)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Connection, DNS, proxy or timeout failure before a response arrived
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Binance returned a non-success status; code and message are the
    /// upstream error payload, unmodified
    #[error("Binance API error (HTTP {status}): code {code}: {message}")]
    Api {
        status: u16,
        code: i64,
        message: String,
    },

    /// A success response whose body did not decode as the expected JSON
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl BinanceError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        BinanceError::Configuration(msg.into())
    }

    /// HTTP status of an API error, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            BinanceError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            BinanceError::Configuration(_) => "configuration",
            BinanceError::Transport(_) => "transport",
            BinanceError::Api { .. } => "api",
            BinanceError::Decode(_) => "decode",
        }
    }
}

pub type Result<T> = std::result::Result<T, BinanceError>;
