//! Data store for Murmur
//!
//! Resolvers and guards only ever talk to the [`Store`] trait, so the
//! in-memory implementation can be swapped for a persistent one without
//! touching them.

mod memory;
pub mod seed;

pub use memory::InMemoryStore;

use crate::error::ApiResult;
use crate::models::{LikeState, NewPost, NewUser, Post, PostId, User, UserId, UserPatch};

/// Record store for users and posts
///
/// Lookups return owned snapshots. Every mutating operation validates and
/// applies its change inside a single write section, so two records touched
/// by one call (a friendship) are never observed half-updated.
pub trait Store: Send + Sync {
    /// All users in insertion order
    fn users(&self) -> Vec<User>;

    /// Find a user by id
    fn find_user(&self, id: UserId) -> Option<User>;

    /// Find the first user with exactly this display name
    fn find_user_by_name(&self, name: &str) -> Option<User>;

    /// Find a user by email (case-insensitive)
    fn find_user_by_email(&self, email: &str) -> Option<User>;

    /// Users whose id is in `ids`, in store order
    fn filter_users(&self, ids: &[UserId]) -> Vec<User>;

    /// Create a user
    ///
    /// # Errors
    /// - `ApiError::Conflict` if the email is already registered
    fn insert_user(&self, user: NewUser) -> ApiResult<User>;

    /// Apply a partial update to a user
    ///
    /// # Errors
    /// - `ApiError::NotFound` if the user does not exist
    fn update_user(&self, id: UserId, patch: UserPatch) -> ApiResult<User>;

    /// Make two users friends of each other and return `user_id`'s record
    ///
    /// # Errors
    /// - `ApiError::InvalidArgument` if both ids are the same
    /// - `ApiError::NotFound` if either user does not exist
    /// - `ApiError::Conflict` if they are already friends
    fn add_friendship(&self, user_id: UserId, friend_id: UserId) -> ApiResult<User>;

    /// All posts in insertion order
    fn posts(&self) -> Vec<Post>;

    /// Find a post by id
    fn find_post(&self, id: PostId) -> Option<Post>;

    /// Posts written by `author_id`
    fn posts_by_author(&self, author_id: UserId) -> Vec<Post>;

    /// Create a post
    ///
    /// # Errors
    /// - `ApiError::NotFound` if the author does not exist
    fn insert_post(&self, post: NewPost) -> ApiResult<Post>;

    /// Like the post for `user_id`, or take the like back if already given
    ///
    /// # Errors
    /// - `ApiError::NotFound` if the post does not exist
    fn toggle_like(&self, post_id: PostId, user_id: UserId) -> ApiResult<(Post, LikeState)>;

    /// Remove a post and return it
    ///
    /// # Errors
    /// - `ApiError::NotFound` if the post does not exist
    fn delete_post(&self, post_id: PostId) -> ApiResult<Post>;
}
