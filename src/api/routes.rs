//! HTTP API route definitions.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{health, hello, metrics, openapi, version, AppState};

/// Method and path of every route the router can register.
pub const ROUTES: &[(&str, &str)] = &[
    ("GET", "/health"),
    ("GET", "/hello"),
    ("GET", "/version"),
    ("GET", "/metrics"),
    ("GET", "/api-docs/openapi.json"),
];

/// Create the API router.
///
/// `/metrics` is only registered when the state carries a Prometheus handle.
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(health))
        .route("/hello", get(hello))
        .route("/version", get(version))
        .route("/api-docs/openapi.json", get(openapi));

    if let Some(handle) = state.metrics.clone() {
        router = router.route("/metrics", get(move || metrics(handle.clone())));
    }

    router
        .route_layer(middleware::from_fn(track_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Record request count and latency, labelled by matched route.
async fn track_metrics(matched: MatchedPath, req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();

    let response = next.run(req).await;

    crate::metrics::record_http_request(
        start,
        matched.as_str(),
        &method,
        response.status().as_u16(),
    );
    response
}
