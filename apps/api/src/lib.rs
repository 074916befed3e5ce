//! Murmur API library
//!
//! This module exposes the core API components for use in integration tests
//! and by the `murmur-api` binary.

pub mod config;
pub mod error;
pub mod graphql;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

// Re-export commonly used types
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use graphql::{build_schema, ContextBuilder, MurmurSchema, RequestContext, SchemaBuilder};
pub use services::{AuthConfig, AuthService};
pub use store::{InMemoryStore, Store};
