//! Profile and friendship mutations

use async_graphql::{Context, ErrorExtensions, InputObject, Object, Result, ID};

use crate::graphql::operations::operations;
use crate::graphql::resolvers::{FriendArgs, UpdateMyInfoArgs};
use crate::graphql::types::{null_on_error, parse_id, request_context, User};

/// Fields of the caller's profile to change; absent fields are kept
#[derive(Debug, Default, InputObject)]
pub struct UpdateMyInfoInput {
    pub name: Option<String>,
    pub age: Option<i32>,
}

#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    /// Update the signed-in user's name and/or age
    async fn update_my_info(&self, ctx: &Context<'_>, input: UpdateMyInfoInput) -> Option<User> {
        null_on_error(ctx, update_my_info(ctx, input).await)
    }

    /// Befriend another user
    async fn add_friend(&self, ctx: &Context<'_>, user_id: ID) -> Option<User> {
        null_on_error(ctx, add_friend(ctx, &user_id).await)
    }
}

async fn update_my_info(ctx: &Context<'_>, input: UpdateMyInfoInput) -> Result<User> {
    let request = request_context(ctx)?;
    let args = UpdateMyInfoArgs {
        name: input.name,
        age: input.age,
    };

    operations(ctx)?
        .update_my_info
        .call((), args, request.clone())
        .await
        .map(User::from)
        .map_err(|e| e.extend())
}

async fn add_friend(ctx: &Context<'_>, user_id: &ID) -> Result<User> {
    let request = request_context(ctx)?;
    let args = FriendArgs {
        user_id: parse_id(user_id).map_err(|e| e.extend())?,
    };

    operations(ctx)?
        .add_friend
        .call((), args, request.clone())
        .await
        .map(User::from)
        .map_err(|e| e.extend())
}
