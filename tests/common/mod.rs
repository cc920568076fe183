//! Shared helpers for driving the router in-process.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use conduit_api::{app, AppConfig, AppState};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tower::ServiceExt;

pub const SECRET: &str = "test-secret";

pub fn router() -> Router {
    app(AppState::new(AppConfig::with_secret(SECRET), None))
}

/// Router whose database pool points at a port nothing listens on.
pub fn router_with_unreachable_database() -> Router {
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(2))
        .connect_lazy("postgres://conduit@127.0.0.1:1/conduit")
        .expect("lazy pool builds");
    app(AppState::new(AppConfig::with_secret(SECRET), Some(pool)))
}

pub fn router_with_body_limit(bytes: usize) -> Router {
    let mut config = AppConfig::with_secret(SECRET);
    config.body_limit_bytes = bytes;
    app(AppState::new(config, None))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Paths of every validation issue, dotted.
    pub fn issue_paths(&self) -> Vec<String> {
        self.json()["error"]["details"]["issues"]
            .as_array()
            .map(|issues| {
                issues
                    .iter()
                    .map(|i| {
                        i["path"]
                            .as_array()
                            .map(|p| {
                                p.iter()
                                    .map(|s| match s {
                                        Value::String(s) => s.clone(),
                                        other => other.to_string(),
                                    })
                                    .collect::<Vec<_>>()
                                    .join(".")
                            })
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

pub async fn send(method: Method, uri: &str, body: Option<Value>, token: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Token {}", token));
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request builds");
    call(router(), request).await
}

/// Run one request through `router` and collect the response.
pub async fn call(router: Router, request: Request<Body>) -> TestResponse {
    let response = router.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads")
        .to_vec();
    TestResponse { status, body }
}

pub async fn get(uri: &str) -> TestResponse {
    send(Method::GET, uri, None, None).await
}

/// Register a user and return the issued token.
pub async fn register(username: &str, email: &str) -> String {
    let res = send(
        Method::POST,
        "/api/users",
        Some(serde_json::json!({
            "user": { "username": username, "email": email, "password": "secret123" }
        })),
        None,
    )
    .await;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.text());
    res.json()["user"]["token"]
        .as_str()
        .expect("token present")
        .to_string()
}
