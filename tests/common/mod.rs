//! Common test utilities

use binance_client::{Binance, Endpoints};
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_API_SECRET: &str = "test-api-secret";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    MockServer::start().await
}

/// Client with credentials, pointed at the mock server for both hosts
pub fn client_for(server: &MockServer) -> Binance {
    Binance::builder()
        .credentials(TEST_API_KEY, TEST_API_SECRET)
        .endpoints(Endpoints::custom(&server.uri(), &server.uri()).expect("mock server URI"))
        .build()
        .expect("client builds against mock server")
}
