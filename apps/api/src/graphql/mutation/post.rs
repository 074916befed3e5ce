//! Post mutations

use async_graphql::{Context, ErrorExtensions, InputObject, Object, Result, ID};

use crate::graphql::guards::Resolver;
use crate::graphql::operations::{operations, Operations};
use crate::graphql::resolvers::{NewPostArgs, PostArgs};
use crate::graphql::types::{null_on_error, parse_id, request_context, Post};
use crate::models::Post as StoredPost;

/// Input for publishing a post
#[derive(Debug, InputObject)]
pub struct AddPostInput {
    pub title: String,
    pub body: Option<String>,
}

#[derive(Default)]
pub struct PostMutation;

#[Object]
impl PostMutation {
    /// Publish a post as the signed-in user
    async fn add_post(&self, ctx: &Context<'_>, input: AddPostInput) -> Option<Post> {
        null_on_error(ctx, add_post(ctx, input).await)
    }

    /// Delete one of the signed-in user's posts
    async fn delete_post(&self, ctx: &Context<'_>, post_id: ID) -> Option<Post> {
        null_on_error(ctx, post_operation(ctx, &post_id, |ops| &ops.delete_post).await)
    }

    /// Like a post, or take the like back
    async fn like_post(&self, ctx: &Context<'_>, post_id: ID) -> Option<Post> {
        null_on_error(ctx, post_operation(ctx, &post_id, |ops| &ops.like_post).await)
    }
}

async fn add_post(ctx: &Context<'_>, input: AddPostInput) -> Result<Post> {
    let request = request_context(ctx)?;
    let args = NewPostArgs {
        title: input.title,
        body: input.body,
    };

    operations(ctx)?
        .add_post
        .call((), args, request.clone())
        .await
        .map(Post::from)
        .map_err(|e| e.extend())
}

/// Run an operation that targets an existing post by id
async fn post_operation(
    ctx: &Context<'_>,
    post_id: &ID,
    select: fn(&Operations) -> &Resolver<(), PostArgs, StoredPost>,
) -> Result<Post> {
    let request = request_context(ctx)?;
    let args = PostArgs {
        post_id: parse_id(post_id).map_err(|e| e.extend())?,
    };

    select(operations(ctx)?)
        .call((), args, request.clone())
        .await
        .map(Post::from)
        .map_err(|e| e.extend())
}
