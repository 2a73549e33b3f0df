//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → Health check endpoint
//! - `/reports` → Read-only course and teacher reports

use crate::routes::{health::health_routes, reports::reports_routes};
use axum::Router;
use util::state::AppState;

pub mod health;
pub mod reports;

/// Builds the complete `/api` router, bound to `app_state`.
pub fn routes(app_state: AppState) -> Router {
    tracing::info!("mounting /health and /reports routes");

    Router::new()
        .nest("/health", health_routes())
        .nest("/reports", reports_routes())
        .with_state(app_state)
}
