//! Account resolvers: sign-up and login

use super::{LoginArgs, SignUpArgs};
use crate::error::ApiResult;
use crate::graphql::context::RequestContext;
use crate::models::User;

/// Register a new account
pub async fn sign_up(_parent: (), args: SignUpArgs, ctx: RequestContext) -> ApiResult<User> {
    let name = args.name.filter(|name| !name.trim().is_empty());
    ctx.auth()
        .sign_up(ctx.store(), name, &args.email, &args.password)
        .await
}

/// Exchange credentials for a signed token
pub async fn login(_parent: (), args: LoginArgs, ctx: RequestContext) -> ApiResult<String> {
    ctx.auth()
        .login(ctx.store(), &args.email, &args.password)
        .await
}
