use crate::deployment::{self, Deployment};
use crate::AppState;
use axum::extract::State;
use axum::http::header::HOST;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub environment: String,
    pub deployment: Deployment,
    pub api_base_url: String,
    pub version: &'static str,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health_handler))
}

/// Liveness plus the API base URL clients on this host should use
#[tracing::instrument(skip_all)]
pub async fn health_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> (StatusCode, Json<HealthResponse>) {
    let host = headers
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost");

    let (status, code, database) = match state.database.ping().await {
        Ok(()) => ("ok", StatusCode::OK, "connected"),
        Err(e) => {
            tracing::error!(error = %e, "health check could not reach the database");
            ("degraded", StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    let response = HealthResponse {
        status,
        database,
        environment: state.config.environment.clone(),
        deployment: Deployment::detect(host),
        api_base_url: deployment::api_base_url(
            host,
            state.config.http_port,
            state.config.public_api_url.as_deref(),
        ),
        version: env!("CARGO_PKG_VERSION"),
    };

    (code, Json(response))
}
