//! GraphQL type definitions for Murmur
//!
//! Object types wrap the store records and resolve their relations
//! (friends, posts, authors, like givers) through the request context.

mod post;
mod user;

pub use post::Post;
pub use user::{Token, User};

use async_graphql::{Context, ErrorExtensions, Result, ID};

use crate::error::ApiError;
use crate::graphql::context::RequestContext;

/// Fetch the per-request context inserted by the HTTP layer
pub(crate) fn request_context<'a>(ctx: &Context<'a>) -> Result<&'a RequestContext> {
    ctx.data::<RequestContext>()
        .map_err(|_| ApiError::Internal("request context missing".to_string()).extend())
}

/// Resolve a nullable field, reporting a failure and yielding `null`
///
/// Keeps a rejected root operation from discarding the rest of the response.
pub(crate) fn null_on_error<T>(ctx: &Context<'_>, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            ctx.add_error(ctx.set_error_path(err.into_server_error(ctx.item.pos)));
            None
        }
    }
}

/// Parse a numeric `ID` argument
pub(crate) fn parse_id(id: &ID) -> Result<u64, ApiError> {
    id.as_str()
        .trim()
        .parse()
        .map_err(|_| ApiError::InvalidArgument(format!("malformed id: {:?}", id.as_str())))
}
