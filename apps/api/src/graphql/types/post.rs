//! Post GraphQL type

use async_graphql::{Context, Object, Result, ID};
use chrono::{DateTime, Utc};

use super::{request_context, User};
use crate::models::Post as StoredPost;

/// A post written by a user
pub struct Post {
    inner: StoredPost,
}

impl Post {
    pub fn new(post: StoredPost) -> Self {
        Self { inner: post }
    }
}

impl From<StoredPost> for Post {
    fn from(post: StoredPost) -> Self {
        Self::new(post)
    }
}

#[Object]
impl Post {
    /// Unique post identifier
    async fn id(&self) -> ID {
        ID::from(self.inner.id.to_string())
    }

    /// Author of the post
    async fn author(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let request = request_context(ctx)?;
        Ok(request.store().find_user(self.inner.author_id).map(User::from))
    }

    async fn title(&self) -> &str {
        &self.inner.title
    }

    async fn body(&self) -> Option<&str> {
        self.inner.body.as_deref()
    }

    /// Users who liked the post
    async fn like_givers(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let request = request_context(ctx)?;
        Ok(request
            .store()
            .filter_users(&self.inner.like_giver_ids)
            .into_iter()
            .map(User::from)
            .collect())
    }

    /// When the post was published
    async fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }
}
