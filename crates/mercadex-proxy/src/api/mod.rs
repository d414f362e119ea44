mod forward;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use mercadex_core::AppConfig;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, REQUEST_ID_HEADER};

/// Shared handler state: one pooled HTTP client and the upstream root.
#[derive(Clone)]
pub struct AppState {
    pub client: reqwest::Client,
    /// Upstream API root without trailing slash.
    pub upstream_url: Arc<str>,
}

impl AppState {
    pub fn new(client: reqwest::Client, upstream_url: &str) -> Self {
        Self {
            client,
            upstream_url: Arc::from(upstream_url.trim_end_matches('/')),
        }
    }

    /// Builds the upstream client with the configured user agent and timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self::new(client, &config.upstream_url))
    }

    fn upstream_endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.upstream_url, path.trim_start_matches('/'))
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Error response carrying a status and a `{"error": ...}` body.
#[derive(Debug)]
pub struct ProxyError {
    status: StatusCode,
    message: String,
}

impl ProxyError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn upstream(status: StatusCode) -> Self {
        Self::new(status, format!("Mercadona API error: {}", status.as_u16()))
    }

    fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }

    fn method_not_allowed() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    }

    fn missing_endpoint() -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Missing endpoint parameter")
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/mercadona/{*path}", any(forward::proxy_catalog))
        .route("/api/proxy", any(forward::proxy_endpoint))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(HealthData { status: "ok" })
}

#[cfg(test)]
#[path = "../api_test.rs"]
mod tests;
