//! GraphQL queries for Murmur

mod post;
mod user;

pub use post::PostQuery;
pub use user::UserQuery;

use async_graphql::MergedObject;

/// Root query type combining all query domains
#[derive(MergedObject, Default)]
pub struct Query(UserQuery, PostQuery);
