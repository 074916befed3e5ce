//! User resolvers

use super::{FriendArgs, UpdateMyInfoArgs};
use crate::error::{ApiError, ApiResult};
use crate::graphql::context::RequestContext;
use crate::models::{User, UserId, UserPatch};

/// Current user's record
pub async fn me(_parent: (), _args: (), ctx: RequestContext) -> ApiResult<User> {
    let me = ctx.me()?;
    me_record(&ctx, me.id)
}

/// Update the caller's name and/or age
///
/// Absent fields and an empty name leave the stored value untouched.
pub async fn update_my_info(
    _parent: (),
    args: UpdateMyInfoArgs,
    ctx: RequestContext,
) -> ApiResult<User> {
    let me = ctx.me()?;

    if let Some(age) = args.age {
        if age < 0 {
            return Err(ApiError::InvalidArgument(
                "age must not be negative".to_string(),
            ));
        }
    }

    let patch = UserPatch {
        name: args.name.filter(|name| !name.trim().is_empty()),
        age: args.age,
    };

    if patch.is_empty() {
        return me_record(&ctx, me.id);
    }

    let user = ctx.store().update_user(me.id, patch)?;
    tracing::debug!(user_id = user.id, "Profile updated");
    Ok(user)
}

/// Befriend another user; both friend lists are updated together
pub async fn add_friend(_parent: (), args: FriendArgs, ctx: RequestContext) -> ApiResult<User> {
    let me = ctx.me()?;
    ctx.store().add_friendship(me.id, args.user_id)
}

fn me_record(ctx: &RequestContext, id: UserId) -> ApiResult<User> {
    ctx.store()
        .find_user(id)
        .ok_or_else(|| ApiError::not_found("user", id))
}
