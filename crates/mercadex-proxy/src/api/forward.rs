//! Pass-through handlers for the upstream catalog API.
//!
//! Only `GET` is forwarded. Bare `OPTIONS` requests get an empty 200; CORS
//! preflights are answered by the CORS layer before reaching these handlers.

use axum::{
    extract::{Path, Query, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::{AppState, ProxyError};

pub(super) const CACHE_POLICY: &str = "s-maxage=300, stale-while-revalidate=600";

/// `/api/mercadona/{*path}`: forwards to `{upstream}/{path}`.
pub(super) async fn proxy_catalog(
    State(state): State<AppState>,
    method: Method,
    Path(path): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    if let Some(response) = preflight(&method) {
        return response;
    }
    let params = without_param(params, "path");
    respond(forward(&state, &path, &params).await)
}

/// `/api/proxy?endpoint=...`: the older single-endpoint form.
pub(super) async fn proxy_endpoint(
    State(state): State<AppState>,
    method: Method,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    if let Some(response) = preflight(&method) {
        return response;
    }
    let Some(endpoint) = params
        .iter()
        .find(|(key, value)| key == "endpoint" && !value.is_empty())
        .map(|(_, value)| value.clone())
    else {
        return ProxyError::missing_endpoint().into_response();
    };
    let params = without_param(params, "endpoint");
    respond(forward(&state, &endpoint, &params).await)
}

/// Short-circuits everything but `GET`.
fn preflight(method: &Method) -> Option<Response> {
    if method == Method::OPTIONS {
        return Some(StatusCode::OK.into_response());
    }
    if method != Method::GET {
        return Some(ProxyError::method_not_allowed().into_response());
    }
    None
}

fn without_param(params: Vec<(String, String)>, name: &str) -> Vec<(String, String)> {
    params.into_iter().filter(|(key, _)| key != name).collect()
}

fn respond(result: Result<serde_json::Value, ProxyError>) -> Response {
    match result {
        Ok(data) => ([(header::CACHE_CONTROL, CACHE_POLICY)], Json(data)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn forward(
    state: &AppState,
    path: &str,
    params: &[(String, String)],
) -> Result<serde_json::Value, ProxyError> {
    let url = state.upstream_endpoint(path);
    let response = state
        .client
        .get(&url)
        .header(header::ACCEPT, "application/json")
        .query(params)
        .send()
        .await
        .map_err(|e| {
            tracing::error!(url = %url, error = %e, "upstream request failed");
            ProxyError::internal()
        })?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(url = %url, status = status.as_u16(), "upstream returned an error status");
        let status =
            StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return Err(ProxyError::upstream(status));
    }

    response.json().await.map_err(|e| {
        tracing::error!(url = %url, error = %e, "upstream body was not valid JSON");
        ProxyError::internal()
    })
}
