//! Test helper functions for integration tests
//!
//! Shared across the test files using the tests/common/ pattern.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use hextaui_core::catalog::Registry;
use hextaui_core::config::SiteConfig;
use hextaui_core::server::{self, AppState};
use std::sync::{Arc, Once};
use tower::ServiceExt;

/// Initialize logging for tests (only once per test run)
static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_target(true)
                    .with_level(true),
            )
            .with(tracing_subscriber::filter::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Router over the bundled catalog with default config
pub fn test_app() -> Router {
    test_app_with(Registry::embedded().expect("embedded catalog should build"), &SiteConfig::default())
}

pub fn test_app_with(registry: Registry, config: &SiteConfig) -> Router {
    init_test_logging();
    server::router(Arc::new(AppState::new(registry, config)))
}

/// A response reduced to what the tests assert on
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Issue a GET request against the router in-process
pub async fn get(app: Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request");

    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");

    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).expect("utf-8 body"),
    }
}
