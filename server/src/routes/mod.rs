//! HTTP route definitions.

pub mod docs;
pub mod health;
pub mod procedures;

use crate::AppState;
use axum::Router;

/// Create all application routes.
pub fn create_routes(server_url: &str) -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(procedures::routes())
        .merge(docs::routes(server_url))
}
