//! User queries

use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::graphql::operations::operations;
use crate::graphql::types::{null_on_error, request_context, User};

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// The signed-in user
    async fn me(&self, ctx: &Context<'_>) -> Option<User> {
        null_on_error(ctx, me(ctx).await)
    }

    /// Look up a user by display name
    async fn user(&self, ctx: &Context<'_>, name: String) -> Result<Option<User>> {
        let request = request_context(ctx)?;
        Ok(request.store().find_user_by_name(&name).map(User::from))
    }

    /// All users
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let request = request_context(ctx)?;
        Ok(request.store().users().into_iter().map(User::from).collect())
    }
}

async fn me(ctx: &Context<'_>) -> Result<User> {
    let request = request_context(ctx)?;
    operations(ctx)?
        .me
        .call((), (), request.clone())
        .await
        .map(User::from)
        .map_err(|e| e.extend())
}
