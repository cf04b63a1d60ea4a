//! Health check endpoint.

use axum::{extract::State, routing::get, Json, Router};
use personas_dispatch::PoolStatus;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::AppState;

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub pool: PoolSummary,
}

/// Connection pool occupancy.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PoolSummary {
    /// Connections currently open
    pub size: u32,
    /// Open connections not in use
    pub idle: usize,
}

impl From<PoolStatus> for PoolSummary {
    fn from(status: PoolStatus) -> Self {
        Self {
            size: status.size,
            idle: status.idle,
        }
    }
}

/// Create health routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(root))
}

/// Health check handler.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Server is up", body = HealthResponse))
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        pool: state.dispatcher.pool_status().into(),
    })
}

/// Root handler.
async fn root() -> &'static str {
    "API de Personas"
}
