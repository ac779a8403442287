//! Configuration Management
//!
//! Credentials, proxy descriptor and base-URL selection. All of it is
//! immutable once a client has been built.

pub mod credentials;
pub mod endpoints;
pub mod proxy;

// Re-export
pub use credentials::{Credentials, SecretString};
pub use endpoints::Endpoints;
pub use proxy::ProxyConfig;
