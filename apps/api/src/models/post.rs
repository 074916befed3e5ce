//! Post model

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::user::UserId;

/// Post identifier, monotonically assigned by the store
pub type PostId = u64;

/// A post written by a user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub id: PostId,
    pub author_id: UserId,
    pub title: String,
    pub body: Option<String>,
    /// Users who liked the post; never holds duplicates
    pub like_giver_ids: Vec<UserId>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Whether `user_id` currently likes this post
    pub fn is_liked_by(&self, user_id: UserId) -> bool {
        self.like_giver_ids.contains(&user_id)
    }

    /// Flip the like of `user_id` and report the resulting state
    pub fn toggle_like(&mut self, user_id: UserId) -> LikeState {
        if let Some(index) = self.like_giver_ids.iter().position(|&id| id == user_id) {
            self.like_giver_ids.remove(index);
            LikeState::NotLiked
        } else {
            self.like_giver_ids.push(user_id);
            LikeState::Liked
        }
    }
}

/// Fields required to create a post
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: UserId,
    pub title: String,
    pub body: Option<String>,
}

/// Like state of a (post, user) pair after a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeState {
    NotLiked,
    Liked,
}
