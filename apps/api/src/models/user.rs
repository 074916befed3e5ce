//! User and authentication models for Murmur
//!
//! This module contains:
//! - User accounts with profile measurements and friend lists
//! - Insert/patch shapes used by the store
//! - JWT claims and the per-request identity derived from them

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// User identifier, assigned by the store on sign-up
pub type UserId = u64;

/// User account record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Account email (unique, stored lowercase)
    pub email: String,

    /// Argon2 PHC hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Display name
    pub name: Option<String>,

    /// Age in years
    pub age: Option<i32>,

    /// Height in centimetres
    pub height: Option<f64>,

    /// Weight in kilograms
    pub weight: Option<f64>,

    /// Friends of this user; kept symmetric by the store
    pub friend_ids: Vec<UserId>,
}

impl User {
    /// Whether `other` is already on this user's friend list
    pub fn is_friend_of(&self, other: UserId) -> bool {
        self.friend_ids.contains(&other)
    }
}

/// Fields required to create a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: Option<String>,
    pub email: String,
    pub password_hash: String,
}

/// Partial update applied by "update my info"
///
/// `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub age: Option<i32>,
}

impl UserPatch {
    /// True when applying the patch would change nothing
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none()
    }

    /// Apply the patch in place
    pub fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = Some(name);
        }
        if let Some(age) = self.age {
            user.age = Some(age);
        }
    }
}

/// JWT claims for an authentication token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub id: UserId,

    /// User's email
    pub email: String,

    /// User's display name
    pub name: Option<String>,

    /// Issued at timestamp (Unix epoch)
    pub iat: i64,

    /// Expiration timestamp (Unix epoch)
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Create new claims for a user
    pub fn new(user: &User, issuer: &str, ttl_secs: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            iat: now,
            exp: now.saturating_add(ttl_secs),
            iss: issuer.to_string(),
        }
    }
}

/// Authenticated identity ("me") for the lifetime of one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            email: claims.email,
            name: claims.name,
        }
    }
}
