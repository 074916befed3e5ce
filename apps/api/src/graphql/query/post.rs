//! Post queries

use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

use crate::graphql::types::{parse_id, request_context, Post};

#[derive(Default)]
pub struct PostQuery;

#[Object]
impl PostQuery {
    /// All posts, oldest first
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let request = request_context(ctx)?;
        Ok(request.store().posts().into_iter().map(Post::from).collect())
    }

    /// Look up a post by id
    async fn post(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Post>> {
        let request = request_context(ctx)?;
        let id = parse_id(&id).map_err(|e| e.extend())?;
        Ok(request.store().find_post(id).map(Post::from))
    }
}
