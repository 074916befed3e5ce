//! GraphQL mutations for Murmur
//!
//! Every mutation delegates to its guarded entry in
//! [`Operations`](crate::graphql::operations::Operations).

mod auth;
mod post;
mod user;

pub use auth::AuthMutation;
pub use post::{AddPostInput, PostMutation};
pub use user::{UpdateMyInfoInput, UserMutation};

use async_graphql::MergedObject;

/// Root mutation type combining all mutation domains
#[derive(MergedObject, Default)]
pub struct Mutation(UserMutation, PostMutation, AuthMutation);
