//! Per-request context for resolvers
//!
//! The [`ContextBuilder`] runs once per request: it verifies the optional
//! token and produces the [`RequestContext`] that every resolver and guard
//! receives. A token that fails verification aborts the request; a request
//! without a token simply has no identity.

use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::models::Identity;
use crate::services::AuthService;
use crate::store::Store;

/// Shared dependencies plus the optional authenticated identity
#[derive(Clone)]
pub struct RequestContext {
    store: Arc<dyn Store>,
    auth: AuthService,
    me: Option<Identity>,
}

impl RequestContext {
    /// Assemble a context directly (tests and internal callers)
    pub fn new(store: Arc<dyn Store>, auth: AuthService, me: Option<Identity>) -> Self {
        Self { store, auth, me }
    }

    /// Data store
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// Password hashing and token service
    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    /// Identity decoded from the request token, if any
    pub fn identity(&self) -> Option<&Identity> {
        self.me.as_ref()
    }

    /// Identity decoded from the request token
    ///
    /// # Errors
    /// - `ApiError::Unauthenticated` if the request carried no token
    pub fn me(&self) -> ApiResult<&Identity> {
        self.me.as_ref().ok_or(ApiError::Unauthenticated)
    }
}

impl std::fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("me", &self.me)
            .finish_non_exhaustive()
    }
}

/// Builds a [`RequestContext`] from an inbound request's token
#[derive(Clone)]
pub struct ContextBuilder {
    store: Arc<dyn Store>,
    auth: AuthService,
}

impl ContextBuilder {
    /// Create a new context builder
    pub fn new(store: Arc<dyn Store>, auth: AuthService) -> Self {
        Self { store, auth }
    }

    /// Build the context for one request
    ///
    /// # Errors
    /// - `ApiError::InvalidToken` if the token fails verification or names a
    ///   user that no longer exists
    pub fn build(&self, token: Option<&str>) -> ApiResult<RequestContext> {
        let me = match token {
            None => None,
            Some(token) => {
                let claims = self.auth.verify_token(token)?;

                if self.store.find_user(claims.id).is_none() {
                    tracing::debug!(user_id = claims.id, "Token subject no longer exists");
                    return Err(ApiError::InvalidToken("unknown token subject".to_string()));
                }

                tracing::debug!(user_id = claims.id, "Request authenticated");
                Some(Identity::from(claims))
            }
        };

        Ok(RequestContext::new(self.store.clone(), self.auth.clone(), me))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::AuthConfig;
    use crate::store::InMemoryStore;
    use assert_matches::assert_matches;

    async fn builder_with_user() -> (ContextBuilder, String) {
        let auth = AuthService::new(AuthConfig::new("ctx-secret".to_string()).hash_rounds(1))
            .unwrap();
        let store = Arc::new(InMemoryStore::new());
        let user = auth
            .sign_up(store.as_ref(), Some("Fong".to_string()), "fong@test.com", "123456")
            .await
            .unwrap();
        let token = auth.issue_token(&user).unwrap();
        (ContextBuilder::new(store, auth), token)
    }

    #[tokio::test]
    async fn test_no_token_means_no_identity() {
        let (builder, _) = builder_with_user().await;
        let ctx = builder.build(None).unwrap();

        assert!(ctx.identity().is_none());
        assert_matches!(ctx.me(), Err(ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_valid_token_yields_identity() {
        let (builder, token) = builder_with_user().await;
        let ctx = builder.build(Some(&token)).unwrap();

        let me = ctx.me().unwrap();
        assert_eq!(me.email, "fong@test.com");
        assert!(ctx.store().find_user(me.id).is_some());
    }

    #[tokio::test]
    async fn test_invalid_token_fails_the_request() {
        let (builder, _) = builder_with_user().await;
        assert_matches!(
            builder.build(Some("not.a.jwt")),
            Err(ApiError::InvalidToken(_))
        );
    }

    #[tokio::test]
    async fn test_expired_token_fails_the_request() {
        let (builder, _) = builder_with_user().await;
        let user = builder.store.users().remove(0);

        let mut config = AuthConfig::new("ctx-secret".to_string()).hash_rounds(1);
        config.token_ttl_secs = -3600;
        let expired = AuthService::new(config).unwrap().issue_token(&user).unwrap();

        assert_matches!(
            builder.build(Some(&expired)),
            Err(ApiError::InvalidToken(_))
        );
    }

    #[tokio::test]
    async fn test_token_for_missing_user_fails_the_request() {
        let (builder, token) = builder_with_user().await;
        let empty = ContextBuilder::new(Arc::new(InMemoryStore::new()), builder.auth.clone());

        assert_matches!(empty.build(Some(&token)), Err(ApiError::InvalidToken(_)));
    }
}
