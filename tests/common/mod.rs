#![allow(dead_code)]

use std::{collections::HashMap, net::SocketAddr};

use axum::{
    body::Body,
    extract::{Query, RawQuery},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing,
    Json, Router,
};
use http_body_util::BodyExt;
use reqwest::Url;
use serde_json::{json, Value};
use tower::ServiceExt;

use port_goods_quote::infra::proxy::{self, ProxyState};

/// Country fixtures in the remote wire format.
pub fn countries() -> Value {
    json!([
        { "id_negara": 1, "nama_negara": "Indonesia", "kode_negara": "ID" },
        { "id_negara": 2, "nama_negara": "Singapore", "kode_negara": "SG" }
    ])
}

fn ports() -> Vec<Value> {
    vec![
        json!({ "id_pelabuhan": 10, "nama_pelabuhan": "Tanjung Priok", "id_negara": 1 }),
        json!({ "id_pelabuhan": 11, "nama_pelabuhan": "Tanjung Perak", "id_negara": 1 }),
        json!({ "id_pelabuhan": 20, "nama_pelabuhan": "Jurong", "id_negara": 2 }),
    ]
}

fn items() -> Vec<Value> {
    vec![
        json!({
            "id_barang": 100,
            "nama_barang": "Kopi",
            "description": "Arabika Gayo",
            "id_pelabuhan": 10,
            "harga": 100000,
            "diskon": 10
        }),
        json!({
            "id_barang": 101,
            "nama_barang": "Teh",
            "description": "Teh hitam",
            "id_pelabuhan": 10,
            "harga": 25000
        }),
        json!({
            "id_barang": 200,
            "nama_barang": "Lada",
            "description": "",
            "id_pelabuhan": 20,
            "harga": "5000"
        }),
    ]
}

/// Applies `filter={"where":{field:id}}` the way the remote catalogue does.
fn apply_filter(rows: Vec<Value>, params: &HashMap<String, String>) -> Vec<Value> {
    let Some(filter) = params
        .get("filter")
        .and_then(|raw| serde_json::from_str::<Value>(raw).ok())
    else {
        return rows;
    };
    let Some(clauses) = filter["where"].as_object() else {
        return rows;
    };
    rows.into_iter()
        .filter(|row| clauses.iter().all(|(field, wanted)| &row[field] == wanted))
        .collect()
}

/// A stand-in for the remote catalogue with a few misbehaving routes.
pub fn upstream_router() -> Router {
    Router::new()
        .route("/negaras", routing::get(|| async { Json(countries()) }))
        .route(
            "/pelabuhans",
            routing::get(|Query(params): Query<HashMap<String, String>>| async move {
                Json(apply_filter(ports(), &params))
            }),
        )
        .route(
            "/barangs",
            routing::get(|Query(params): Query<HashMap<String, String>>| async move {
                Json(apply_filter(items(), &params))
            }),
        )
        .route(
            "/echo/query",
            routing::get(|RawQuery(query): RawQuery| async move { Json(json!({ "query": query })) }),
        )
        .route(
            "/nested/a/b",
            routing::get(|| async { Json(json!({ "nested": true })) }),
        )
        .route(
            "/broken",
            routing::get(|| async {
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({ "detail": "maintenance window" })),
                )
            }),
        )
        .route(
            "/denied",
            routing::get(|| async { (StatusCode::FORBIDDEN, Json(json!({ "detail": "nope" }))) }),
        )
        .route("/html", routing::get(|| async { "<html>not json</html>".into_response() }))
}

/// Serves `router` on an ephemeral local port.
pub async fn spawn_server(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

pub async fn spawn_upstream() -> Url {
    let addr = spawn_server(upstream_router()).await;
    Url::parse(&format!("http://{addr}/")).unwrap()
}

/// An address nothing listens on.
pub async fn dead_address() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// The proxy router forwarding to `remote_base`.
pub fn proxy_app(remote_base: Url) -> Router {
    proxy::router(ProxyState::new(remote_base).unwrap())
}

/// Serves the proxy in front of the stub catalogue and returns its `/proxy/` base.
pub async fn spawn_proxy_chain() -> Url {
    let upstream = spawn_upstream().await;
    let addr = spawn_server(proxy_app(upstream)).await;
    Url::parse(&format!("http://{addr}/proxy/")).unwrap()
}

pub async fn send(app: Router, method: &str, uri: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, "GET", uri).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
