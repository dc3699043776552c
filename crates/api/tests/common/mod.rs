//! Shared helpers for API integration tests.
//!
//! The returned app uses a lazy pool: no connection is made until a query
//! runs, so these tests exercise routing, middleware, auth and request
//! validation without a live database. Anything that must hit Postgres
//! reports `degraded`/errors instead, which the tests assert where relevant.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use tower::ServiceExt;

use linkdock_api::analyze::PageAnalyzer;
use linkdock_api::auth::google::HttpGoogleVerifier;
use linkdock_api::config::ServerConfig;
use linkdock_api::router::build_app_router;
use linkdock_api::state::AppState;
use linkdock_api::summarize::NoopSummarizer;
use linkdock_checker::LinkProber;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        admin_password: None,
        summarizer_url: None,
    }
}

/// Build the full application router with all middleware layers.
///
/// Mirrors production via [`build_app_router`] so tests exercise the same
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery).
pub fn build_test_app() -> Router {
    let config = test_config();
    // A short acquire timeout is required here: sqlx retries failed connection
    // attempts until the pool's acquire deadline, and the default (30s) would
    // collide with the request-timeout layer instead of surfacing the
    // degraded/error responses these tests assert.
    let pool = sqlx::postgres::PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(1))
        .connect_lazy("postgres://localhost/linkdock_test")
        .expect("lazy pool construction must not fail");

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        prober: Arc::new(LinkProber::new().expect("prober construction must not fail")),
        analyzer: Arc::new(PageAnalyzer::new().expect("analyzer construction must not fail")),
        summarizer: Arc::new(NoopSummarizer),
        google_verifier: Arc::new(
            HttpGoogleVerifier::new().expect("verifier construction must not fail"),
        ),
    };

    build_app_router(state, &config)
}

/// Send a GET request to the app and return the raw response.
pub async fn get(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(path)
        .body(Body::empty())
        .expect("request construction must not fail");
    app.oneshot(request).await.expect("request must complete")
}

/// Send a request built by the caller and return the raw response.
pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request must complete")
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body must collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body must be valid JSON")
}
