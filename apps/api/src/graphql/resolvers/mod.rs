//! Base resolvers
//!
//! Plain async functions over `(parent, args, context)` holding the business
//! logic of each operation. They assume their guards already ran; the
//! [`Operations`](crate::graphql::operations::Operations) table decides which
//! guards wrap which resolver.

pub mod auth;
pub mod post;
pub mod user;

use crate::graphql::guards::GuardArgs;
use crate::models::{PostId, UserId};

/// Arguments of `updateMyInfo`
#[derive(Debug, Clone, Default)]
pub struct UpdateMyInfoArgs {
    pub name: Option<String>,
    pub age: Option<i32>,
}

/// Arguments of `addFriend`
#[derive(Debug, Clone, Copy)]
pub struct FriendArgs {
    pub user_id: UserId,
}

/// Arguments of `addPost`
#[derive(Debug, Clone)]
pub struct NewPostArgs {
    pub title: String,
    pub body: Option<String>,
}

/// Arguments of operations that target one post
#[derive(Debug, Clone, Copy)]
pub struct PostArgs {
    pub post_id: PostId,
}

/// Arguments of `signUp`
#[derive(Clone)]
pub struct SignUpArgs {
    pub name: Option<String>,
    pub email: String,
    pub password: String,
}

/// Arguments of `login`
#[derive(Clone)]
pub struct LoginArgs {
    pub email: String,
    pub password: String,
}

impl GuardArgs for UpdateMyInfoArgs {}
impl GuardArgs for FriendArgs {}
impl GuardArgs for NewPostArgs {}
impl GuardArgs for SignUpArgs {}
impl GuardArgs for LoginArgs {}

impl GuardArgs for PostArgs {
    fn post_id(&self) -> Option<PostId> {
        Some(self.post_id)
    }
}
