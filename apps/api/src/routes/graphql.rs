//! GraphQL HTTP route handlers for Murmur
//!
//! - `POST /graphql` - Execute a query or mutation
//! - `GET /graphql/playground` - Interactive GraphQL Playground
//!
//! The request token is read from the `x-token` header, falling back to
//! `Authorization: Bearer <token>`. A token that fails verification rejects
//! the whole request with 401 before the schema runs.

use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{Html, IntoResponse},
    routing::{get, post},
    Router,
};

use crate::error::ApiResult;
use crate::graphql::{ContextBuilder, MurmurSchema};

/// Header carrying the token in the original client protocol
pub const TOKEN_HEADER: &str = "x-token";

/// Shared state for GraphQL handlers
#[derive(Clone)]
pub struct GraphQLState {
    /// Executable schema
    pub schema: MurmurSchema,
    /// Per-request context builder
    pub contexts: ContextBuilder,
}

impl GraphQLState {
    pub fn new(schema: MurmurSchema, contexts: ContextBuilder) -> Self {
        Self { schema, contexts }
    }
}

/// Create the GraphQL router
pub fn graphql_router(state: GraphQLState) -> Router {
    Router::new()
        .route("/", post(graphql_handler))
        .route("/playground", get(graphql_playground))
        .with_state(state)
}

/// Execute a GraphQL request with the caller's context attached
async fn graphql_handler(
    State(state): State<GraphQLState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> ApiResult<GraphQLResponse> {
    let context = state.contexts.build(extract_token(&headers))?;

    let request = req.into_inner().data(context);
    Ok(state.schema.execute(request).await.into())
}

async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}

/// Token from `x-token`, or from a bearer `Authorization` header
pub fn extract_token(headers: &HeaderMap) -> Option<&str> {
    let x_token = headers
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|token| !token.is_empty());

    x_token.or_else(|| extract_bearer_token(headers))
}

/// Extract bearer token from Authorization header (case-insensitive)
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())?;

    let mut parts = value.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;

    // Reject malformed values like "Bearer <token> <extra>"
    if parts.next().is_some() {
        return None;
    }

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}
