//! Health check HTTP route handlers
//!
//! - `GET /health` - Simple liveness check (returns 200 OK)
//! - `GET /health/live` - Liveness probe with version and record counts

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use std::sync::Arc;

use crate::store::Store;

/// Shared state for health check handlers
#[derive(Clone)]
pub struct HealthState {
    store: Arc<dyn Store>,
}

impl HealthState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

/// Create health check router
pub fn health_router(state: HealthState) -> Router {
    Router::new()
        .route("/", get(simple_health))
        .route("/live", get(liveness_probe))
        .with_state(state)
}

/// Always returns OK if the server is running
async fn simple_health() -> &'static str {
    "OK"
}

async fn liveness_probe(State(state): State<HealthState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION"),
        "users": state.store.users().len(),
        "posts": state.store.posts().len(),
    }))
}
