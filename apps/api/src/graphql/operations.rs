//! Guarded operation table
//!
//! Every root operation is bound once, at schema build time, to its base
//! resolver wrapped in an explicit guard chain. Chain ordering mistakes
//! surface here as a `Configuration` error instead of at request time.

use async_graphql::{Context, ErrorExtensions};

use crate::error::{ApiError, ApiResult};
use crate::graphql::guards::{Guard, GuardChain, Resolver};
use crate::graphql::resolvers::{
    auth, post, user, FriendArgs, LoginArgs, NewPostArgs, PostArgs, SignUpArgs, UpdateMyInfoArgs,
};
use crate::models::{Post, User};

/// Root operations with their guards applied
#[derive(Clone)]
pub struct Operations {
    pub me: Resolver<(), (), User>,
    pub update_my_info: Resolver<(), UpdateMyInfoArgs, User>,
    pub add_friend: Resolver<(), FriendArgs, User>,
    pub add_post: Resolver<(), NewPostArgs, Post>,
    pub like_post: Resolver<(), PostArgs, Post>,
    pub delete_post: Resolver<(), PostArgs, Post>,
    pub sign_up: Resolver<(), SignUpArgs, User>,
    pub login: Resolver<(), LoginArgs, String>,
}

impl Operations {
    /// Compose every operation with its guard chain
    ///
    /// # Errors
    /// - `ApiError::Configuration` if a guard chain is mis-ordered
    pub fn bind() -> ApiResult<Self> {
        let authenticated = GuardChain::new([Guard::Authenticated])?;
        let existing_post = GuardChain::new([Guard::Authenticated, Guard::PostExists])?;
        let own_post =
            GuardChain::new([Guard::Authenticated, Guard::PostExists, Guard::PostAuthor])?;
        let open = GuardChain::open();

        Ok(Self {
            me: authenticated.wrap(Resolver::new(user::me)),
            update_my_info: authenticated.wrap(Resolver::new(user::update_my_info)),
            add_friend: authenticated.wrap(Resolver::new(user::add_friend)),
            add_post: authenticated.wrap(Resolver::new(post::add_post)),
            like_post: existing_post.wrap(Resolver::new(post::like_post)),
            delete_post: own_post.wrap(Resolver::new(post::delete_post)),
            sign_up: open.wrap(Resolver::new(auth::sign_up)),
            login: open.wrap(Resolver::new(auth::login)),
        })
    }
}

/// Fetch the operation table registered on the schema
pub(crate) fn operations<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Operations> {
    ctx.data::<Operations>()
        .map_err(|_| ApiError::Configuration("operations not bound".to_string()).extend())
}
