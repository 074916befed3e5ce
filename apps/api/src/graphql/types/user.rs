//! User and authentication GraphQL types

use async_graphql::{Context, Object, Result, SimpleObject, ID};

use super::{request_context, Post};
use crate::models::{HeightUnit, User as StoredUser, WeightUnit};

/// A registered user
pub struct User {
    inner: StoredUser,
}

impl User {
    pub fn new(user: StoredUser) -> Self {
        Self { inner: user }
    }
}

impl From<StoredUser> for User {
    fn from(user: StoredUser) -> Self {
        Self::new(user)
    }
}

#[Object]
impl User {
    /// Unique user identifier
    async fn id(&self) -> ID {
        ID::from(self.inner.id.to_string())
    }

    /// Account email
    async fn email(&self) -> &str {
        &self.inner.email
    }

    /// Display name
    async fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    /// Age in years
    async fn age(&self) -> Option<i32> {
        self.inner.age
    }

    /// Height, in centimetres unless another unit is requested
    async fn height(&self, #[graphql(default)] unit: HeightUnit) -> Option<f64> {
        self.inner.height.map(|cm| unit.from_centimetres(cm))
    }

    /// Weight, in kilograms unless another unit is requested
    async fn weight(&self, #[graphql(default)] unit: WeightUnit) -> Option<f64> {
        self.inner.weight.map(|kg| unit.from_kilograms(kg))
    }

    /// Friends of this user
    async fn friends(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let request = request_context(ctx)?;
        Ok(request
            .store()
            .filter_users(&self.inner.friend_ids)
            .into_iter()
            .map(User::from)
            .collect())
    }

    /// Posts written by this user
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let request = request_context(ctx)?;
        Ok(request
            .store()
            .posts_by_author(self.inner.id)
            .into_iter()
            .map(Post::from)
            .collect())
    }
}

/// Signed authentication token returned by `login`
#[derive(Debug, Clone, SimpleObject)]
pub struct Token {
    /// JWT to send back in the `x-token` header
    pub token: String,
}
