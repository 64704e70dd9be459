//! Test application fixture
//!
//! Every `TestApp` owns a fresh in-memory SQLite database with migrations
//! applied, so tests never share state.

use std::time::Duration;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request},
    response::Response,
    Router,
};
use friendgraph::backend::auth::{CredentialStore, TokenService};
use friendgraph::backend::server::config::memory_pool;
use friendgraph::backend::server::{build_app, AppState};
use friendgraph::shared::config::ServerSettings;
use serde_json::Value;
use tower::ServiceExt;

use super::auth_helpers::bearer;

/// Secret the fixture signs tokens with
pub const TEST_SECRET: &[u8] = b"integration-test-secret";

/// Lowest cost bcrypt accepts; keeps signups fast
pub const TEST_COST: u32 = 4;

/// Full router over an isolated database
pub struct TestApp {
    pub app: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = memory_pool().await.expect("Failed to open in-memory database");
        let state = AppState::new(
            pool,
            TokenService::new(TEST_SECRET, Duration::from_secs(3600)),
            CredentialStore::new(TEST_COST).expect("Failed to build credential store"),
        );
        let app = build_app(state.clone(), &ServerSettings::default());
        Self { app, state }
    }

    pub fn pool(&self) -> &sqlx::SqlitePool {
        &self.state.db_pool
    }

    /// Send a request through the whole router
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response {
        self.send(request(Method::GET, uri, token, None)).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> Response {
        self.send(request(Method::POST, uri, token, Some(body))).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> Response {
        self.send(request(Method::PUT, uri, token, Some(body))).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>, body: Option<Value>) -> Response {
        self.send(request(Method::DELETE, uri, token, body)).await
    }
}

/// Build a request with an optional bearer token and JSON body
pub fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", bearer(token));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).expect("valid request")
}
