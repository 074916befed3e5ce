//! Business logic services for Murmur
//!
//! This module contains:
//! - Authentication: password hashing, sign-up, login and JWT handling

pub mod auth;

pub use auth::{AuthConfig, AuthService};
