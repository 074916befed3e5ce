//! HTTP route handlers for the Murmur API
//!
//! - GraphQL endpoint and playground
//! - Health check endpoints

pub mod graphql;
pub mod health;

pub use graphql::{extract_token, graphql_router, GraphQLState};
pub use health::{health_router, HealthState};

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::graphql::{ContextBuilder, MurmurSchema};
use crate::store::Store;

/// Assemble every route of the service
///
/// CORS and tracing layers are added by the binary.
pub fn app_router(schema: MurmurSchema, contexts: ContextBuilder, store: Arc<dyn Store>) -> Router {
    Router::new()
        .route("/", get(root))
        // POST /graphql, GET /graphql/playground
        .nest("/graphql", graphql_router(GraphQLState::new(schema, contexts)))
        // GET /health, GET /health/live
        .nest("/health", health_router(HealthState::new(store)))
}

async fn root() -> &'static str {
    "Welcome to Murmur - a small social GraphQL API"
}
