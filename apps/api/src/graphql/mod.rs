//! GraphQL schema and resolvers for Murmur
//!
//! - `context`: per-request identity and dependencies
//! - `guards`: resolver guard chains and the field policy extension
//! - `resolvers`: guard-free business logic
//! - `operations`: each root operation bound to its guard chain
//! - `query`, `mutation`, `types`: the async-graphql surface

pub mod context;
pub mod guards;
pub mod mutation;
pub mod operations;
pub mod query;
pub mod resolvers;
pub mod schema;
pub mod types;

pub use context::{ContextBuilder, RequestContext};
pub use guards::{FieldGuard, FieldPolicy, Guard, GuardChain};
pub use schema::{build_schema, MurmurSchema, SchemaBuilder};
