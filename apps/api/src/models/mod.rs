//! Domain models for Murmur
//!
//! This module contains the records held by the store:
//! - Users, their profile measurements and friendships
//! - Posts and their like givers
//! - JWT claims and the per-request authenticated identity

pub mod post;
pub mod units;
pub mod user;

pub use post::{LikeState, NewPost, Post, PostId};
pub use units::{HeightUnit, WeightUnit};
pub use user::{Claims, Identity, NewUser, User, UserId, UserPatch};
