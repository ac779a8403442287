//! HTTP session and dispatch
//!
//! One `Session` per API host. The underlying `reqwest::Client` is shared
//! between sessions and is safe for concurrent use; everything else is
//! read-only after construction, so a session can be cloned freely across
//! tasks.

use crate::config::{Credentials, ProxyConfig};
use crate::error::{BinanceError, Result};
use crate::sign::{self, Params};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Builds the shared HTTP client from transport options
///
/// When a proxy descriptor is supplied, every request of every session built
/// on this client is routed through it, signed or not.
pub(crate) fn build_http_client(timeout: Duration, proxy: Option<&ProxyConfig>) -> Result<Client> {
    let mut builder = Client::builder()
        .timeout(timeout)
        .user_agent(concat!("binance-client/", env!("CARGO_PKG_VERSION")));

    if let Some(proxy) = proxy {
        builder = builder.proxy(proxy.to_reqwest()?);
    }

    builder.build().map_err(BinanceError::Transport)
}

/// A configured connection to one API host
#[derive(Clone, Debug)]
pub struct Session {
    client: Client,
    base_url: Url,
    credentials: Option<Credentials>,
    recv_window: Option<u64>,
}

/// Binance error payload: `{"code": -1121, "msg": "Invalid symbol."}`
#[derive(Debug, Deserialize)]
struct ApiErrorPayload {
    code: i64,
    msg: String,
}

impl Session {
    pub fn new(
        client: Client,
        base_url: Url,
        credentials: Option<Credentials>,
        recv_window: Option<u64>,
    ) -> Self {
        Self {
            client,
            base_url,
            credentials,
            recv_window,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Dispatches one request and decodes the response body
    ///
    /// Private calls (`authenticated == true`) have their parameters routed
    /// through the signer and carry the `X-MBX-APIKEY` header; public calls
    /// are sent unsigned with no key header. All parameters travel in the
    /// query string, which is what Binance signs.
    ///
    /// # Errors
    /// * `Configuration` - authenticated call without credentials
    /// * `Transport` - connection, DNS, proxy or timeout failure
    /// * `Api` - HTTP status >= 400, upstream code/message preserved
    /// * `Decode` - success status with a malformed JSON body
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        params: Params,
        authenticated: bool,
    ) -> Result<(StatusCode, Value)> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| BinanceError::configuration(format!("Invalid endpoint path: {}", e)))?;

        let request = if authenticated {
            let credentials = self.credentials.as_ref().ok_or_else(|| {
                BinanceError::configuration("Private endpoint requires API credentials")
            })?;

            let signed = sign::signed_query(
                params,
                credentials.secret_key.expose_secret(),
                self.recv_window,
            )?;
            url.set_query(Some(&signed.query));

            self.client
                .request(method.clone(), url.clone())
                .header(API_KEY_HEADER, credentials.api_key.expose_secret())
        } else {
            if !params.is_empty() {
                url.set_query(Some(&params.encode()));
            }
            self.client.request(method.clone(), url.clone())
        };

        debug!(%method, path, authenticated, host = %self.base_url, "dispatching request");

        let response = request.send().await.map_err(|e| {
            warn!(%method, path, error = %e, "transport failure");
            BinanceError::Transport(e)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(BinanceError::Transport)?;

        if !status.is_success() {
            let err = api_error(status, &body);
            warn!(%method, path, status = status.as_u16(), error = %err, "API error response");
            return Err(err);
        }

        // /api/v3/ping answers with an empty object; treat a fully empty
        // body the same way
        let value = if body.is_empty() {
            Value::Object(serde_json::Map::new())
        } else {
            serde_json::from_str(&body).map_err(BinanceError::Decode)?
        };

        Ok((status, value))
    }

    /// `send` plus decoding into a concrete response type
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: Params,
        authenticated: bool,
    ) -> Result<T> {
        let (_, body) = self.send(method, path, params, authenticated).await?;
        serde_json::from_value(body).map_err(BinanceError::Decode)
    }
}

/// Maps a non-success response to `Api`, carrying the upstream payload
///
/// Bodies that are not the documented `{"code":…,"msg":…}` object are carried
/// raw with code 0 rather than failing the error path.
fn api_error(status: StatusCode, body: &str) -> BinanceError {
    match serde_json::from_str::<ApiErrorPayload>(body) {
        Ok(payload) => BinanceError::Api {
            status: status.as_u16(),
            code: payload.code,
            message: payload.msg,
        },
        Err(_) => BinanceError::Api {
            status: status.as_u16(),
            code: 0,
            message: body.to_string(),
        },
    }
}
