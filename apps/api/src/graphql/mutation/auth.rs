//! Account mutations: sign-up and login

use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::graphql::operations::operations;
use crate::graphql::resolvers::{LoginArgs, SignUpArgs};
use crate::graphql::types::{null_on_error, request_context, Token, User};

#[derive(Default)]
pub struct AuthMutation;

#[Object]
impl AuthMutation {
    /// Register an account; email and password are required
    async fn sign_up(
        &self,
        ctx: &Context<'_>,
        name: Option<String>,
        email: String,
        password: String,
    ) -> Option<User> {
        let args = SignUpArgs {
            name,
            email,
            password,
        };
        null_on_error(ctx, sign_up(ctx, args).await)
    }

    /// Exchange credentials for a token
    async fn login(&self, ctx: &Context<'_>, email: String, password: String) -> Option<Token> {
        null_on_error(ctx, login(ctx, LoginArgs { email, password }).await)
    }
}

async fn sign_up(ctx: &Context<'_>, args: SignUpArgs) -> Result<User> {
    let request = request_context(ctx)?;
    operations(ctx)?
        .sign_up
        .call((), args, request.clone())
        .await
        .map(User::from)
        .map_err(|e| e.extend())
}

async fn login(ctx: &Context<'_>, args: LoginArgs) -> Result<Token> {
    let request = request_context(ctx)?;
    operations(ctx)?
        .login
        .call((), args, request.clone())
        .await
        .map(|token| Token { token })
        .map_err(|e| e.extend())
}
