//! Test fixtures for API integration tests
//!
//! The demo dataset is loaded for every [`TestApp`]:
//! - Fong (1): friends with Kevin and Mary, wrote post 1 "Hello World!"
//! - Kevin (2): friends with Fong, wrote post 2 "Good Night"
//! - Mary (3): friends with Fong, no weight recorded

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use murmur_api::graphql::FieldPolicy;
use murmur_api::models::UserId;
use murmur_api::routes::app_router;
use murmur_api::store::seed;
use murmur_api::{
    AuthConfig, AuthService, ContextBuilder, InMemoryStore, MurmurSchema, SchemaBuilder, Store,
};

pub const FONG: UserId = 1;
pub const KEVIN: UserId = 2;
pub const MARY: UserId = 3;

/// Secret used to sign tokens in tests
pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-chars";

/// Auth service with the cheapest hashing cost
pub fn test_auth() -> AuthService {
    AuthService::new(AuthConfig::new(TEST_SECRET.to_string()).hash_rounds(1))
        .expect("test auth config is valid")
}

/// Fully wired application over the demo dataset
pub struct TestApp {
    pub store: Arc<InMemoryStore>,
    pub auth: AuthService,
    pub schema: MurmurSchema,
    pub contexts: ContextBuilder,
}

impl TestApp {
    /// App with the standard field policy
    pub async fn seeded() -> Self {
        Self::with_policy(FieldPolicy::standard()).await
    }

    /// App with a custom field policy
    pub async fn with_policy(policy: FieldPolicy) -> Self {
        let auth = test_auth();
        let store = Arc::new(
            seed::demo_store(&auth)
                .await
                .expect("demo dataset loads"),
        );
        let schema = SchemaBuilder::new()
            .field_policy(policy)
            .build()
            .expect("schema builds");
        let contexts = ContextBuilder::new(store.clone(), auth.clone());

        Self {
            store,
            auth,
            schema,
            contexts,
        }
    }

    /// Signed token for a stored user
    pub fn token_for(&self, user_id: UserId) -> String {
        let user = self.store.find_user(user_id).expect("user exists");
        self.auth.issue_token(&user).expect("token issues")
    }

    /// Execute a document with an optional token
    pub async fn execute(&self, query: &str, token: Option<&str>) -> async_graphql::Response {
        let context = self.contexts.build(token).expect("context builds");
        self.schema
            .execute(async_graphql::Request::new(query).data(context))
            .await
    }

    /// Execute a document without identity
    pub async fn execute_anonymous(&self, query: &str) -> async_graphql::Response {
        self.execute(query, None).await
    }

    /// Execute a document as a stored user
    pub async fn execute_as(&self, user_id: UserId, query: &str) -> async_graphql::Response {
        let token = self.token_for(user_id);
        self.execute(query, Some(&token)).await
    }

    /// HTTP router over the same store and schema
    pub fn router(&self) -> Router {
        app_router(
            self.schema.clone(),
            self.contexts.clone(),
            self.store.clone(),
        )
    }
}
