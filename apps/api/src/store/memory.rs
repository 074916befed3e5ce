//! In-memory store backed by two vectors behind a read/write lock

use chrono::Utc;
use parking_lot::RwLock;

use super::Store;
use crate::error::{ApiError, ApiResult};
use crate::models::{LikeState, NewPost, NewUser, Post, PostId, User, UserId, UserPatch};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    posts: Vec<Post>,
}

impl Tables {
    fn user_mut(&mut self, id: UserId) -> ApiResult<&mut User> {
        self.users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or_else(|| ApiError::not_found("user", id))
    }

    fn next_user_id(&self) -> UserId {
        self.users.iter().map(|user| user.id).max().unwrap_or(0) + 1
    }

    fn next_post_id(&self) -> PostId {
        self.posts.iter().map(|post| post.id).max().unwrap_or(0) + 1
    }
}

/// Process-local store; contents are lost on restart
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records
    pub fn with_records(users: Vec<User>, posts: Vec<Post>) -> Self {
        let users = users
            .into_iter()
            .map(|mut user| {
                user.email = user.email.to_lowercase();
                user
            })
            .collect();
        Self {
            tables: RwLock::new(Tables { users, posts }),
        }
    }
}

impl Store for InMemoryStore {
    fn users(&self) -> Vec<User> {
        self.tables.read().users.clone()
    }

    fn find_user(&self, id: UserId) -> Option<User> {
        self.tables
            .read()
            .users
            .iter()
            .find(|user| user.id == id)
            .cloned()
    }

    fn find_user_by_name(&self, name: &str) -> Option<User> {
        self.tables
            .read()
            .users
            .iter()
            .find(|user| user.name.as_deref() == Some(name))
            .cloned()
    }

    fn find_user_by_email(&self, email: &str) -> Option<User> {
        // Emails are stored lowercased
        let email = email.to_lowercase();
        self.tables
            .read()
            .users
            .iter()
            .find(|user| user.email == email)
            .cloned()
    }

    fn filter_users(&self, ids: &[UserId]) -> Vec<User> {
        self.tables
            .read()
            .users
            .iter()
            .filter(|user| ids.contains(&user.id))
            .cloned()
            .collect()
    }

    fn insert_user(&self, new_user: NewUser) -> ApiResult<User> {
        let mut tables = self.tables.write();

        let email = new_user.email.to_lowercase();
        if tables
            .users
            .iter()
            .any(|user| user.email == email)
        {
            return Err(ApiError::conflict("user", email));
        }

        let user = User {
            id: tables.next_user_id(),
            email,
            password_hash: new_user.password_hash,
            name: new_user.name,
            age: None,
            height: None,
            weight: None,
            friend_ids: Vec::new(),
        };
        tables.users.push(user.clone());

        tracing::debug!(user_id = user.id, "User inserted");
        Ok(user)
    }

    fn update_user(&self, id: UserId, patch: UserPatch) -> ApiResult<User> {
        let mut tables = self.tables.write();
        let user = tables.user_mut(id)?;
        patch.apply(user);
        Ok(user.clone())
    }

    fn add_friendship(&self, user_id: UserId, friend_id: UserId) -> ApiResult<User> {
        if user_id == friend_id {
            return Err(ApiError::InvalidArgument(
                "cannot add yourself as a friend".to_string(),
            ));
        }

        let mut tables = self.tables.write();

        // Validate both sides before mutating either one
        if tables.user_mut(friend_id)?.is_friend_of(user_id)
            || tables.user_mut(user_id)?.is_friend_of(friend_id)
        {
            return Err(ApiError::conflict("friendship", friend_id));
        }

        tables.user_mut(friend_id)?.friend_ids.push(user_id);
        let user = tables.user_mut(user_id)?;
        user.friend_ids.push(friend_id);

        tracing::debug!(user_id, friend_id, "Friendship added");
        Ok(user.clone())
    }

    fn posts(&self) -> Vec<Post> {
        self.tables.read().posts.clone()
    }

    fn find_post(&self, id: PostId) -> Option<Post> {
        self.tables
            .read()
            .posts
            .iter()
            .find(|post| post.id == id)
            .cloned()
    }

    fn posts_by_author(&self, author_id: UserId) -> Vec<Post> {
        self.tables
            .read()
            .posts
            .iter()
            .filter(|post| post.author_id == author_id)
            .cloned()
            .collect()
    }

    fn insert_post(&self, new_post: NewPost) -> ApiResult<Post> {
        let mut tables = self.tables.write();
        tables.user_mut(new_post.author_id)?;

        let post = Post {
            id: tables.next_post_id(),
            author_id: new_post.author_id,
            title: new_post.title,
            body: new_post.body,
            like_giver_ids: Vec::new(),
            created_at: Utc::now(),
        };
        tables.posts.push(post.clone());

        tracing::debug!(post_id = post.id, author_id = post.author_id, "Post inserted");
        Ok(post)
    }

    fn toggle_like(&self, post_id: PostId, user_id: UserId) -> ApiResult<(Post, LikeState)> {
        let mut tables = self.tables.write();
        let post = tables
            .posts
            .iter_mut()
            .find(|post| post.id == post_id)
            .ok_or_else(|| ApiError::not_found("post", post_id))?;

        let state = post.toggle_like(user_id);
        Ok((post.clone(), state))
    }

    fn delete_post(&self, post_id: PostId) -> ApiResult<Post> {
        let mut tables = self.tables.write();
        let index = tables
            .posts
            .iter()
            .position(|post| post.id == post_id)
            .ok_or_else(|| ApiError::not_found("post", post_id))?;

        Ok(tables.posts.remove(index))
    }
}
