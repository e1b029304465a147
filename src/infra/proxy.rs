//! Stateless pass-through from `/proxy/<path>` to the remote catalogue.
//!
//! Success relays the remote JSON bytes untouched. Every failure, whether the
//! remote is unreachable, answers non-2xx or sends something that is not
//! JSON, becomes the same 500 body; the remote status and body never leak.

use std::{future::Future, net::SocketAddr, time::Duration};

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, RawQuery, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::ProxyConfig;

pub const PROXY_FAILURE_MESSAGE: &str = "Failed to fetch data from external API";

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("invalid proxy path: {0}")]
    InvalidPath(String),
    #[error("remote base URL cannot take path segments")]
    CannotBeABase,
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("upstream body is not JSON: {0}")]
    NotJson(#[from] serde_json::Error),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": PROXY_FAILURE_MESSAGE })),
        )
            .into_response()
    }
}

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
    #[error("invalid CORS origin `{0}`")]
    InvalidOrigin(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Debug)]
pub struct ProxyState {
    http: Client,
    remote_base: Url,
}

impl ProxyState {
    pub fn new(remote_base: Url) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent(concat!("quote-proxy/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, remote_base })
    }
}

/// The proxy and health routes without middleware.
pub fn router(state: ProxyState) -> Router {
    Router::new()
        .route("/proxy/{*path}", get(forward))
        .route("/health", get(health))
        .with_state(state)
}

/// Joins `path` onto `base` segment by segment and attaches `query` as-is.
pub fn remote_url(base: &Url, path: &str, query: Option<&str>) -> Result<Url, ProxyError> {
    let mut url = base.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| ProxyError::CannotBeABase)?;
        segments.pop_if_empty();
        segments.extend(path.split('/').filter(|segment| !segment.is_empty()));
    }
    url.set_query(query.filter(|q| !q.is_empty()));
    Ok(url)
}

async fn forward(
    State(state): State<ProxyState>,
    path: Result<Path<String>, PathRejection>,
    RawQuery(query): RawQuery,
) -> Response {
    let path = match path {
        Ok(Path(path)) => path,
        Err(rejection) => {
            let error = ProxyError::InvalidPath(rejection.body_text());
            tracing::error!(?query, %error, "proxy error");
            return error.into_response();
        }
    };
    match relay(&state, &path, query.as_deref()).await {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(error) => {
            tracing::error!(%path, ?query, %error, "proxy error");
            error.into_response()
        }
    }
}

async fn relay(state: &ProxyState, path: &str, query: Option<&str>) -> Result<Bytes, ProxyError> {
    let url = remote_url(&state.remote_base, path, query)?;
    tracing::info!(%url, "proxying GET request");

    let body = state
        .http
        .get(url)
        .header(header::CONTENT_TYPE, "application/json")
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    serde_json::from_slice::<serde::de::IgnoredAny>(&body)?;
    Ok(body)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer, ServeError> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| ServeError::InvalidOrigin(origin.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600)))
}

/// Binds the configured address outside any runtime. Connections queue from
/// the moment this returns.
pub fn bind(config: &ProxyConfig) -> Result<std::net::TcpListener, ServeError> {
    let listener = std::net::TcpListener::bind(config.bind_addr()?)?;
    listener.set_nonblocking(true)?;
    Ok(listener)
}

/// Serves on `listener` until `shutdown` resolves.
pub async fn serve<F>(
    config: ProxyConfig,
    listener: std::net::TcpListener,
    shutdown: F,
) -> Result<(), ServeError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let state = ProxyState::new(config.remote_base_url.clone())?;
    let app = router(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(&config.cors_origins)?);

    let listener = tokio::net::TcpListener::from_std(listener)?;
    let addr: SocketAddr = listener.local_addr()?;
    tracing::info!(%addr, remote = %config.remote_base_url, "proxy listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    tracing::info!("proxy stopped");
    Ok(())
}
