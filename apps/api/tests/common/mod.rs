//! Common test utilities for API integration tests
//!
//! Provides a seeded application (store, auth, schema, router) and helpers
//! for inspecting GraphQL responses.

#![allow(unused_imports)]

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
