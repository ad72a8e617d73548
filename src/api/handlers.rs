//! HTTP API handlers.
//!
//! The three demo endpoints are pure: the response body depends only on the
//! request, and nothing is shared between requests.

use axum::{extract::Query, Json};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use utoipa::{IntoParams, OpenApi};

/// Name greeted when the `name` parameter is absent or empty.
pub const DEFAULT_NAME: &str = "World";

/// Version string reported by `/version`.
pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Body returned by `/health`.
pub const HEALTH_OK: &str = "OK";

/// Application state shared with handlers.
#[derive(Clone, Default)]
pub struct AppState {
    /// Prometheus renderer, `None` when metrics are disabled.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create app state without metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create app state that serves the given Prometheus handle.
    pub fn with_metrics(handle: PrometheusHandle) -> Self {
        Self {
            metrics: Some(handle),
        }
    }

    /// Whether `/metrics` should be exposed.
    pub fn metrics_enabled(&self) -> bool {
        self.metrics.is_some()
    }
}

/// Query parameters for `/hello`.
#[derive(Debug, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GreetingParams {
    /// Name to greet. Absent or empty greets "World". Repeated values are
    /// joined with commas.
    pub name: Option<String>,
}

impl GreetingParams {
    /// Collect every non-empty `name` value from decoded query pairs.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let names: Vec<&str> = pairs
            .iter()
            .filter(|(key, value)| key == "name" && !value.is_empty())
            .map(|(_, value)| value.as_str())
            .collect();

        Self {
            name: (!names.is_empty()).then(|| names.join(",")),
        }
    }
}

/// Build the greeting for an optional name.
///
/// An empty name is treated like a missing one. Any other value, including
/// whitespace, is interpolated verbatim.
pub fn greeting(name: Option<&str>) -> String {
    let name = name.filter(|n| !n.is_empty()).unwrap_or(DEFAULT_NAME);
    format!("Hello, {name}! Welcome to DevOps CI/CD Demo.")
}

/// Health check handler - always returns 200 "OK".
#[utoipa::path(
    get,
    path = "/health",
    tag = "demo",
    responses((status = 200, description = "Service is up", body = String, content_type = "text/plain"))
)]
pub async fn health() -> &'static str {
    HEALTH_OK
}

/// Greeting handler.
#[utoipa::path(
    get,
    path = "/hello",
    tag = "demo",
    params(GreetingParams),
    responses((status = 200, description = "Greeting for the given name", body = String, content_type = "text/plain"))
)]
pub async fn hello(Query(pairs): Query<Vec<(String, String)>>) -> String {
    greeting(GreetingParams::from_pairs(&pairs).name.as_deref())
}

/// Version handler.
#[utoipa::path(
    get,
    path = "/version",
    tag = "demo",
    responses((status = 200, description = "Service version", body = String, content_type = "text/plain"))
)]
pub async fn version() -> &'static str {
    API_VERSION
}

/// Prometheus exposition handler.
pub async fn metrics(handle: PrometheusHandle) -> String {
    handle.render()
}

/// OpenAPI document for the demo endpoints.
#[derive(OpenApi)]
#[openapi(
    info(title = "DevOps CI/CD Demo", description = "Health, greeting and version endpoints"),
    paths(health, hello, version),
    tags((name = "demo", description = "Demo endpoints"))
)]
pub struct ApiDoc;

/// Serve the generated OpenAPI document.
pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
