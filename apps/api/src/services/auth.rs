//! Authentication service for Murmur
//!
//! This module provides:
//! - Sign-up with Argon2id password hashing
//! - Login returning a signed JWT
//! - Token issuing and verification

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::error::{ApiError, ApiResult};
use crate::models::{Claims, NewUser, User};
use crate::store::Store;

/// Default token lifetime: one day
const DEFAULT_TOKEN_TTL_SECS: i64 = 24 * 3600;

/// Shortest password accepted at sign-up
const MIN_PASSWORD_LENGTH: usize = 6;

/// Authentication service configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// Token TTL in seconds (default: 1 day)
    pub token_ttl_secs: i64,
    /// JWT issuer
    pub issuer: String,
    /// Argon2 time cost (number of passes)
    pub hash_rounds: u32,
}

impl AuthConfig {
    /// Create a new AuthConfig with the default TTL and hashing cost
    pub fn new(jwt_secret: String) -> Self {
        Self {
            jwt_secret,
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            issuer: "murmur".to_string(),
            hash_rounds: Params::DEFAULT_T_COST,
        }
    }

    /// Create AuthConfig from an expiry string (e.g., "1d", "12h")
    pub fn with_expiry_string(jwt_secret: String, expiry: &str) -> Self {
        Self {
            token_ttl_secs: parse_duration_string(expiry).unwrap_or(DEFAULT_TOKEN_TTL_SECS),
            ..Self::new(jwt_secret)
        }
    }

    /// Override the Argon2 time cost
    pub fn hash_rounds(mut self, rounds: u32) -> Self {
        self.hash_rounds = rounds;
        self
    }
}

/// Parse duration strings like "15m", "7d", "24h" to seconds
fn parse_duration_string(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let (split, unit) = s.char_indices().last()?;
    let num: i64 = s[..split].parse().ok()?;

    let multiplier = match unit {
        's' => 1,
        'm' => 60,
        'h' => 3600,
        'd' => 24 * 3600,
        'w' => 7 * 24 * 3600,
        _ => return None,
    };
    num.checked_mul(multiplier)
}

/// Authentication service providing sign-up, login, and token handling
#[derive(Clone)]
pub struct AuthService {
    config: AuthConfig,
    argon2: Argon2<'static>,
    /// Hash verified against when an email is unknown, so a failed login
    /// takes the same time whether or not the account exists.
    dummy_password_hash: String,
}

impl AuthService {
    /// Create a new AuthService instance
    ///
    /// # Errors
    /// - `ApiError::Configuration` if the hashing cost is out of range
    pub fn new(config: AuthConfig) -> ApiResult<Self> {
        let params = Params::new(
            Params::DEFAULT_M_COST,
            config.hash_rounds,
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|e| ApiError::Configuration(format!("invalid hash rounds: {}", e)))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let dummy_salt = SaltString::generate(&mut OsRng);
        let dummy_password_hash = argon2
            .hash_password(b"dummy_password_for_timing_attack_prevention", &dummy_salt)
            .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))?
            .to_string();

        Ok(Self {
            config,
            argon2,
            dummy_password_hash,
        })
    }

    /// Register a new user account
    ///
    /// # Errors
    /// - `ApiError::InvalidArgument` if email or password is invalid
    /// - `ApiError::Conflict` if email already exists
    pub async fn sign_up(
        &self,
        store: &dyn Store,
        name: Option<String>,
        email: &str,
        password: &str,
    ) -> ApiResult<User> {
        if !is_valid_email(email) {
            return Err(ApiError::InvalidArgument("invalid email format".to_string()));
        }

        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ApiError::InvalidArgument(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        // Cheap check first; the store re-checks atomically on insert
        if store.find_user_by_email(email).is_some() {
            return Err(ApiError::conflict("user", email.to_lowercase()));
        }

        let password_hash = self.hash_password(password).await?;

        let user = store.insert_user(NewUser {
            name,
            email: email.trim().to_string(),
            password_hash,
        })?;

        tracing::info!(user_id = user.id, email = %user.email, "User signed up");

        Ok(user)
    }

    /// Check credentials and return a signed token
    ///
    /// # Errors
    /// - `ApiError::InvalidArgument` if the email is unknown or the password is wrong
    pub async fn login(&self, store: &dyn Store, email: &str, password: &str) -> ApiResult<String> {
        let user = store.find_user_by_email(email.trim());

        let (user, password_valid) = match user {
            Some(u) => {
                let valid = self.verify_password(password, &u.password_hash).await?;
                (Some(u), valid)
            }
            None => {
                let _ = self
                    .verify_password(password, &self.dummy_password_hash)
                    .await;
                (None, false)
            }
        };

        let user = match (user, password_valid) {
            (Some(u), true) => u,
            (Some(_), false) => {
                tracing::warn!(email = %email, "Login failed: invalid password");
                return Err(invalid_credentials());
            }
            (None, _) => {
                tracing::warn!(email = %email, "Login failed: user not found");
                return Err(invalid_credentials());
            }
        };

        let token = self.issue_token(&user)?;

        tracing::info!(user_id = user.id, "User logged in");

        Ok(token)
    }

    /// Sign a token carrying `{id, email, name}` for `user`
    pub fn issue_token(&self, user: &User) -> ApiResult<String> {
        let claims = Claims::new(user, &self.config.issuer, self.config.token_ttl_secs);

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )?)
    }

    /// Verify a token and return its claims
    ///
    /// # Errors
    /// - `ApiError::InvalidToken` if token is invalid, expired, or malformed
    pub fn verify_token(&self, token: &str) -> ApiResult<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            tracing::debug!(error = %e, "Token verification failed");
            ApiError::InvalidToken(e.to_string())
        })?;

        Ok(token_data.claims)
    }

    /// Hash a password with Argon2id on the blocking pool
    pub async fn hash_password(&self, password: &str) -> ApiResult<String> {
        let argon2 = self.argon2.clone();
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))
        })
        .await?
    }

    /// Verify a password against an Argon2id hash on the blocking pool
    pub async fn verify_password(&self, password: &str, hash: &str) -> ApiResult<bool> {
        let argon2 = self.argon2.clone();
        let password = password.to_owned();
        let hash = hash.to_owned();

        tokio::task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&hash)
                .map_err(|e| ApiError::Internal(format!("Invalid password hash format: {}", e)))?;

            Ok(argon2
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok())
        })
        .await?
    }
}

fn invalid_credentials() -> ApiError {
    ApiError::InvalidArgument("invalid email or password".to_string())
}

/// Simple email validation
fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.is_empty() || email.len() > 254 {
        return false;
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return false;
    }

    let (local, domain) = (parts[0], parts[1]);

    if local.is_empty() || local.len() > 64 {
        return false;
    }

    if domain.is_empty() || !domain.contains('.') {
        return false;
    }

    domain.split('.').all(|part| !part.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use assert_matches::assert_matches;

    fn service() -> AuthService {
        AuthService::new(AuthConfig::new("test-secret".to_string()).hash_rounds(1)).unwrap()
    }

    #[test]
    fn test_parse_duration_string() {
        assert_eq!(parse_duration_string("15m"), Some(900));
        assert_eq!(parse_duration_string("1d"), Some(86400));
        assert_eq!(parse_duration_string("24h"), Some(86400));
        assert_eq!(parse_duration_string("30s"), Some(30));
        assert_eq!(parse_duration_string("1w"), Some(604800));
        assert_eq!(parse_duration_string(""), None);
        assert_eq!(parse_duration_string("15x"), None);
        assert_eq!(parse_duration_string("d"), None);
    }

    #[test]
    fn test_parse_duration_string_rejects_odd_input() {
        // Multi-byte unit suffix
        assert_eq!(parse_duration_string("1é"), None);
        assert_eq!(parse_duration_string("é"), None);
        // Overflowing multiplication
        assert_eq!(parse_duration_string(&format!("{}w", i64::MAX)), None);
        assert_eq!(
            AuthConfig::with_expiry_string("secret".to_string(), "9223372036854775807d")
                .token_ttl_secs,
            DEFAULT_TOKEN_TTL_SECS
        );
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("fong@test.com"));
        assert!(is_valid_email("test.user@domain.co.uk"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("missing@domain"));
        assert!(!is_valid_email("@domain.com"));
        assert!(!is_valid_email("user@@domain.com"));
    }

    #[test]
    fn test_auth_config_defaults_to_one_day() {
        let config = AuthConfig::new("secret".to_string());
        assert_eq!(config.token_ttl_secs, 86_400);
        assert_eq!(config.issuer, "murmur");

        let config = AuthConfig::with_expiry_string("secret".to_string(), "bogus");
        assert_eq!(config.token_ttl_secs, 86_400);

        let config = AuthConfig::with_expiry_string("secret".to_string(), "12h");
        assert_eq!(config.token_ttl_secs, 12 * 3600);
    }

    #[test]
    fn test_zero_hash_rounds_is_a_configuration_error() {
        let result = AuthService::new(AuthConfig::new("secret".to_string()).hash_rounds(0));
        assert_matches!(result.err(), Some(ApiError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_sign_up_stores_hash_not_plaintext() {
        let auth = service();
        let store = InMemoryStore::new();

        let user = auth
            .sign_up(&store, Some("Fong".to_string()), "fong@test.com", "123456")
            .await
            .unwrap();

        assert_ne!(user.password_hash, "123456");
        assert!(user.password_hash.starts_with("$argon2id$"));
        assert!(auth.verify_password("123456", &user.password_hash).await.unwrap());
        assert_eq!(store.users().len(), 1);
    }

    #[tokio::test]
    async fn test_sign_up_rejects_duplicate_email() {
        let auth = service();
        let store = InMemoryStore::new();

        auth.sign_up(&store, None, "fong@test.com", "123456")
            .await
            .unwrap();
        let result = auth.sign_up(&store, None, "FONG@test.com", "654321").await;

        assert_matches!(result, Err(ApiError::Conflict { resource_type: "user", .. }));
        assert_eq!(store.users().len(), 1);
    }

    #[tokio::test]
    async fn test_sign_up_validates_input() {
        let auth = service();
        let store = InMemoryStore::new();

        assert_matches!(
            auth.sign_up(&store, None, "not-an-email", "123456").await,
            Err(ApiError::InvalidArgument(_))
        );
        assert_matches!(
            auth.sign_up(&store, None, "fong@test.com", "123").await,
            Err(ApiError::InvalidArgument(_))
        );
        assert!(store.users().is_empty());
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let auth = service();
        let store = InMemoryStore::new();
        let user = auth
            .sign_up(&store, Some("Fong".to_string()), "fong@test.com", "123456")
            .await
            .unwrap();

        let token = auth.login(&store, "fong@test.com", "123456").await.unwrap();
        let claims = auth.verify_token(&token).unwrap();

        assert_eq!(claims.id, user.id);
        assert_eq!(claims.email, "fong@test.com");
        assert_eq!(claims.name.as_deref(), Some("Fong"));
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let auth = service();
        let store = InMemoryStore::new();
        auth.sign_up(&store, None, "fong@test.com", "123456")
            .await
            .unwrap();

        let wrong_password = auth.login(&store, "fong@test.com", "nope").await.unwrap_err();
        let unknown_email = auth.login(&store, "ghost@test.com", "123456").await.unwrap_err();

        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert_matches!(wrong_password, ApiError::InvalidArgument(_));
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let ours = service();
        let theirs =
            AuthService::new(AuthConfig::new("other-secret".to_string()).hash_rounds(1)).unwrap();
        let user = User {
            id: 1,
            email: "fong@test.com".to_string(),
            password_hash: String::new(),
            name: None,
            age: None,
            height: None,
            weight: None,
            friend_ids: vec![],
        };

        let token = theirs.issue_token(&user).unwrap();
        assert_matches!(ours.verify_token(&token), Err(ApiError::InvalidToken(_)));
        assert_matches!(ours.verify_token("garbage"), Err(ApiError::InvalidToken(_)));
    }
}
