use std::{net::SocketAddr, time::Duration};

use thiserror::Error;
use url::Url;

pub const DEFAULT_REMOTE_BASE_URL: &str = "http://202.157.176.100:3001";
pub const DEFAULT_PROXY_BASE_URL: &str = "http://127.0.0.1:3000/proxy/";
const DEFAULT_PROXY_HOST: &str = "127.0.0.1";
const DEFAULT_PROXY_PORT: u16 = 3000;
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:8080";
const DEFAULT_CLIENT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {source}")]
    Url {
        var: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("{var} has an invalid value `{value}`")]
    Invalid { var: &'static str, value: String },
}

/// Settings for the proxy forwarder.
///
/// | Env Var           | Default                         |
/// |-------------------|---------------------------------|
/// | `REMOTE_BASE_URL` | `http://202.157.176.100:3001`   |
/// | `PROXY_HOST`      | `127.0.0.1`                     |
/// | `PROXY_PORT`      | `3000`                          |
/// | `CORS_ORIGINS`    | `http://localhost:8080`         |
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub remote_base_url: Url,
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

impl ProxyConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let remote_base_url = url_var("REMOTE_BASE_URL", DEFAULT_REMOTE_BASE_URL)?;
        let host = var_or("PROXY_HOST", DEFAULT_PROXY_HOST);
        let port = parse_var("PROXY_PORT", DEFAULT_PROXY_PORT)?;
        let cors_origins = var_or("CORS_ORIGINS", DEFAULT_CORS_ORIGINS)
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            remote_base_url,
            host,
            port,
            cors_origins,
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::Invalid {
            var: "PROXY_HOST",
            value: raw,
        })
    }
}

/// Settings for the data client used by the form.
///
/// | Env Var               | Default                          |
/// |-----------------------|----------------------------------|
/// | `PROXY_BASE_URL`      | `http://127.0.0.1:3000/proxy/`   |
/// | `CLIENT_TIMEOUT_SECS` | `10`                             |
/// | `EMBEDDED_PROXY`      | `true`                           |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub proxy_base_url: Url,
    pub timeout: Duration,
    pub embedded_proxy: bool,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let proxy_base_url = url_var("PROXY_BASE_URL", DEFAULT_PROXY_BASE_URL)?;
        let timeout = Duration::from_secs(parse_var(
            "CLIENT_TIMEOUT_SECS",
            DEFAULT_CLIENT_TIMEOUT_SECS,
        )?);
        let embedded_proxy = parse_var("EMBEDDED_PROXY", true)?;

        Ok(Self {
            proxy_base_url,
            timeout,
            embedded_proxy,
        })
    }

    /// Redirects the client to a proxy listening on `addr`.
    pub fn with_proxy_at(mut self, addr: SocketAddr) -> Result<Self, ConfigError> {
        let raw = format!("http://{addr}/proxy/");
        self.proxy_base_url = Url::parse(&raw).map_err(|source| ConfigError::Url {
            var: "PROXY_BASE_URL",
            source,
        })?;
        Ok(self)
    }
}

fn var_or(var: &str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| default.to_string())
}

fn url_var(var: &'static str, default: &str) -> Result<Url, ConfigError> {
    let raw = var_or(var, default);
    Url::parse(&raw).map_err(|source| ConfigError::Url { var, source })
}

fn parse_var<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        Err(_) => Ok(default),
    }
}
