//! Network edges: the catalogue data client and the proxy forwarder.

pub mod client;
pub mod proxy;

pub use client::{DataClient, DataClientError};
pub use proxy::{ProxyError, ProxyState, ServeError, PROXY_FAILURE_MESSAGE};
