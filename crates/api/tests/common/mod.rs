#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use codex_api::auth::jwt::JwtConfig;
use codex_api::config::{IdentityConfig, ServerConfig, StoreConfig};
use codex_api::router::build_app_router;
use codex_api::state::AppState;

pub const ADMIN: &str = "admin@codex.local";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout, and a fixed signing secret.
pub fn test_config(store: StoreConfig, identity: IdentityConfig) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        admin_identifier: ADMIN.to_string(),
        store,
        identity,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            session_expiry_mins: 60,
        },
    }
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app(store: StoreConfig, identity: IdentityConfig) -> Router {
    let config = test_config(store, identity);
    let state = AppState::from_config(config.clone()).expect("state should build");
    build_app_router(state, &config).expect("router should build")
}

/// Demo store and demo identity gate.
pub fn demo_app() -> Router {
    build_test_app(StoreConfig::Demo, IdentityConfig::Demo)
}

/// Empty in-memory store and demo identity gate.
pub fn memory_app() -> Router {
    build_test_app(StoreConfig::Memory, IdentityConfig::Demo)
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should not fail")
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn patch_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, json_request(Method::PATCH, uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Log in through the API and return the session token.
pub async fn login(app: Router, password: &str) -> String {
    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "password": password }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["data"]["access_token"]
        .as_str()
        .expect("login should return a token")
        .to_string()
}

pub fn valid_character() -> Value {
    serde_json::json!({
        "name": "Gandalf",
        "description": "A wizard of the Istari.",
        "imageUrl": "https://picsum.photos/seed/gandalf/400/600",
        "universe": "The Lord of the Rings",
        "abilities": "Magic, fireworks",
    })
}
