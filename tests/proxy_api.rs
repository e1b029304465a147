//! Integration tests for the `/proxy/<path>` forwarder.

mod common;

use axum::http::{header, StatusCode};
use common::{body_bytes, body_json, get, proxy_app, send};
use reqwest::Url;
use serde_json::json;

use port_goods_quote::infra::proxy::PROXY_FAILURE_MESSAGE;

async fn assert_fixed_failure(response: axum::response::Response) {
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json, json!({ "error": PROXY_FAILURE_MESSAGE }));
}

#[tokio::test]
async fn relays_remote_json_verbatim() {
    let app = proxy_app(common::spawn_upstream().await);
    let response = get(app, "/proxy/negaras").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    let json = body_json(response).await;
    assert_eq!(json, common::countries());
}

#[tokio::test]
async fn forwards_filter_query_unchanged() {
    let app = proxy_app(common::spawn_upstream().await);
    let uri = "/proxy/pelabuhans?filter=%7B%22where%22%3A%7B%22id_negara%22%3A1%7D%7D";
    let json = body_json(get(app, uri).await).await;

    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|port| port["nama_pelabuhan"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Tanjung Priok", "Tanjung Perak"]);
}

#[tokio::test]
async fn raw_query_reaches_remote() {
    let app = proxy_app(common::spawn_upstream().await);
    let json = body_json(get(app, "/proxy/echo/query?a=1&b=two").await).await;
    assert_eq!(json["query"], "a=1&b=two");
}

#[tokio::test]
async fn nested_paths_are_forwarded() {
    let app = proxy_app(common::spawn_upstream().await);
    let response = get(app, "/proxy/nested/a/b").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["nested"], true);
}

#[tokio::test]
async fn remote_server_error_becomes_fixed_500() {
    let app = proxy_app(common::spawn_upstream().await);
    let response = get(app, "/proxy/broken").await;
    assert_fixed_failure(response).await;
}

#[tokio::test]
async fn remote_client_error_does_not_leak_status_or_body() {
    let app = proxy_app(common::spawn_upstream().await);
    let response = get(app.clone(), "/proxy/denied").await;
    assert_fixed_failure(response).await;

    let response = get(app, "/proxy/no-such-collection").await;
    assert_fixed_failure(response).await;
}

#[tokio::test]
async fn non_json_remote_body_becomes_fixed_500() {
    let app = proxy_app(common::spawn_upstream().await);
    let response = get(app, "/proxy/html").await;
    assert_fixed_failure(response).await;
}

#[tokio::test]
async fn unreachable_remote_becomes_fixed_500() {
    let dead = common::dead_address().await;
    let app = proxy_app(Url::parse(&format!("http://{dead}/")).unwrap());
    let response = get(app, "/proxy/negaras").await;
    assert_fixed_failure(response).await;
}

#[tokio::test]
async fn undecodable_path_becomes_fixed_500() {
    let app = proxy_app(common::spawn_upstream().await);
    let response = get(app, "/proxy/%FF").await;
    assert_fixed_failure(response).await;
}

#[tokio::test]
async fn failure_body_is_exact_bytes() {
    let app = proxy_app(common::spawn_upstream().await);
    let response = get(app, "/proxy/broken").await;
    let bytes = body_bytes(response).await;
    assert_eq!(
        bytes,
        br#"{"error":"Failed to fetch data from external API"}"#.to_vec()
    );
}

#[tokio::test]
async fn only_get_is_routed() {
    let app = proxy_app(common::spawn_upstream().await);
    let response = send(app, "POST", "/proxy/negaras").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = proxy_app(common::spawn_upstream().await);
    let response = get(app, "/negaras").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_reports_version() {
    let app = proxy_app(common::spawn_upstream().await);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}
