//! GraphQL schema builder for Murmur

use async_graphql::{EmptySubscription, Schema};

use crate::error::ApiResult;

use super::guards::{FieldGuardExtension, FieldPolicy};
use super::mutation::Mutation;
use super::operations::Operations;
use super::query::Query;

/// The Murmur GraphQL schema type
pub type MurmurSchema = Schema<Query, Mutation, EmptySubscription>;

/// Builder for the GraphQL schema
///
/// Store and auth service travel with each request in the
/// [`RequestContext`](super::context::RequestContext); the schema itself only
/// carries the guarded operation table and the field policy.
pub struct SchemaBuilder {
    field_policy: FieldPolicy,
}

impl SchemaBuilder {
    /// Create a builder using the standard field policy
    pub fn new() -> Self {
        Self {
            field_policy: FieldPolicy::standard(),
        }
    }

    /// Replace the field policy
    pub fn field_policy(mut self, policy: FieldPolicy) -> Self {
        self.field_policy = policy;
        self
    }

    /// Bind the guarded operations and build the schema
    ///
    /// # Errors
    /// - `ApiError::Configuration` if an operation's guard chain is invalid
    pub fn build(self) -> ApiResult<MurmurSchema> {
        let operations = Operations::bind()?;

        Ok(
            Schema::build(Query::default(), Mutation::default(), EmptySubscription)
                .data(operations)
                .extension(FieldGuardExtension::new(self.field_policy))
                .finish(),
        )
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the schema with the standard field policy
pub fn build_schema() -> ApiResult<MurmurSchema> {
    SchemaBuilder::new().build()
}
