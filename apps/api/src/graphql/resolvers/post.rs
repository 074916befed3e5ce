//! Post resolvers

use super::{NewPostArgs, PostArgs};
use crate::error::{ApiError, ApiResult};
use crate::graphql::context::RequestContext;
use crate::models::{NewPost, Post};

/// Publish a post as the caller
pub async fn add_post(_parent: (), args: NewPostArgs, ctx: RequestContext) -> ApiResult<Post> {
    let me = ctx.me()?;

    if args.title.trim().is_empty() {
        return Err(ApiError::InvalidArgument("title must not be empty".to_string()));
    }

    let post = ctx.store().insert_post(NewPost {
        author_id: me.id,
        title: args.title,
        body: args.body,
    })?;

    tracing::info!(post_id = post.id, author_id = me.id, "Post added");
    Ok(post)
}

/// Like a post, or take the like back if the caller already gave one
pub async fn like_post(_parent: (), args: PostArgs, ctx: RequestContext) -> ApiResult<Post> {
    let me = ctx.me()?;
    let (post, state) = ctx.store().toggle_like(args.post_id, me.id)?;

    tracing::debug!(post_id = post.id, user_id = me.id, state = ?state, "Like toggled");
    Ok(post)
}

/// Remove a post and return the removed record
pub async fn delete_post(_parent: (), args: PostArgs, ctx: RequestContext) -> ApiResult<Post> {
    let post = ctx.store().delete_post(args.post_id)?;

    tracing::info!(post_id = post.id, author_id = post.author_id, "Post deleted");
    Ok(post)
}
