//! API server configuration

use anyhow::{bail, Context, Result};
use murmur_shared_config::{first_env, get_env_or_default, parse_env, CommonConfig, Environment};

/// Minimum required length for JWT_SECRET to be considered secure
const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Secret used when none is configured outside production
const DEVELOPMENT_JWT_SECRET: &str = "development-secret-change-in-production";

/// Argon2 time cost used when none is configured outside production
const DEVELOPMENT_HASH_ROUNDS: u32 = 2;

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Common configuration shared with other services
    pub common: CommonConfig,

    /// Server port (default: 4000)
    pub port: u16,

    /// JWT signing secret (`JWT_SECRET`, alias `SECRET`)
    pub jwt_secret: String,

    /// JWT expiry (default: 1d)
    pub jwt_expiry: String,

    /// Password hashing cost (`HASH_ROUNDS`, alias `SALT_ROUNDS`)
    pub hash_rounds: u32,

    /// CORS allowed origins (optional)
    pub cors_allowed_origins: Option<Vec<String>>,

    /// Load the demo users and posts at startup (default: true)
    pub seed_demo_data: bool,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// In production mode, this function requires:
    /// - `JWT_SECRET`: Must be set and at least 32 characters long
    /// - `HASH_ROUNDS`: Must be explicitly set
    ///
    /// In development/staging mode, defaults are used and logged as warnings.
    pub fn from_env() -> Result<Self> {
        let environment = Environment::from_env();
        let is_production = environment.is_production();

        let jwt_secret = Self::load_jwt_secret(is_production)?;
        let hash_rounds = Self::load_hash_rounds(is_production)?;

        let common = CommonConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        Ok(Self {
            common,

            port: parse_env("PORT", 4000).context("Invalid PORT value")?,

            jwt_secret,

            jwt_expiry: get_env_or_default("JWT_EXPIRY", "1d"),

            hash_rounds,

            cors_allowed_origins: first_env(&["CORS_ORIGINS"]).map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            }),

            seed_demo_data: parse_env("SEED_DEMO_DATA", true)
                .context("Invalid SEED_DEMO_DATA value")?,
        })
    }

    /// Load and validate JWT_SECRET
    ///
    /// In production:
    /// - JWT_SECRET must be explicitly set
    /// - Must be at least MIN_JWT_SECRET_LENGTH characters
    ///
    /// In development: uses a default value with a warning
    fn load_jwt_secret(is_production: bool) -> Result<String> {
        match first_env(&["JWT_SECRET", "SECRET"]) {
            Some(secret) => {
                if is_production && secret.len() < MIN_JWT_SECRET_LENGTH {
                    bail!(
                        "JWT_SECRET must be at least {} characters in production (got {})",
                        MIN_JWT_SECRET_LENGTH,
                        secret.len()
                    );
                }
                Ok(secret)
            }
            None if is_production => {
                bail!(
                    "JWT_SECRET environment variable is required in production. \
                     Please set a secure secret of at least {} characters.",
                    MIN_JWT_SECRET_LENGTH
                );
            }
            None => {
                tracing::warn!(
                    "JWT_SECRET not set, using insecure default. \
                     This is only acceptable in development mode."
                );
                Ok(DEVELOPMENT_JWT_SECRET.to_string())
            }
        }
    }

    /// Load and validate HASH_ROUNDS
    ///
    /// In production: HASH_ROUNDS must be explicitly set to a positive number
    /// In development: uses a default value with a warning
    fn load_hash_rounds(is_production: bool) -> Result<u32> {
        match first_env(&["HASH_ROUNDS", "SALT_ROUNDS"]) {
            Some(rounds) => {
                let rounds: u32 = rounds
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid HASH_ROUNDS value: {}", rounds))?;
                if rounds == 0 {
                    bail!("HASH_ROUNDS must be at least 1");
                }
                Ok(rounds)
            }
            None if is_production => {
                bail!("HASH_ROUNDS environment variable is required in production.");
            }
            None => {
                tracing::warn!(
                    rounds = DEVELOPMENT_HASH_ROUNDS,
                    "HASH_ROUNDS not set, using default. \
                     This is only acceptable in development mode."
                );
                Ok(DEVELOPMENT_HASH_ROUNDS)
            }
        }
    }

    /// Get environment mode
    pub fn environment(&self) -> Environment {
        self.common.environment
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.common.environment.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests that modify environment variables don't run in parallel
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to temporarily set environment variables for a test
    struct EnvGuard {
        vars: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn new(vars: &[(&str, &str)]) -> Self {
            let saved: Vec<_> = vars
                .iter()
                .map(|(k, v)| {
                    let old = env::var(*k).ok();
                    env::set_var(*k, *v);
                    (k.to_string(), old)
                })
                .collect();
            Self { vars: saved }
        }

        fn remove_vars(vars: &[&str]) -> Self {
            let saved: Vec<_> = vars
                .iter()
                .map(|k| {
                    let old = env::var(*k).ok();
                    env::remove_var(*k);
                    (k.to_string(), old)
                })
                .collect();
            Self { vars: saved }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (k, v) in &self.vars {
                match v {
                    Some(val) => env::set_var(k, val),
                    None => env::remove_var(k),
                }
            }
        }
    }

    #[test]
    fn test_jwt_secret_required_in_production() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let _guard = EnvGuard::remove_vars(&["JWT_SECRET", "SECRET"]);

        let err = Config::load_jwt_secret(true).unwrap_err().to_string();
        assert!(err.contains("JWT_SECRET"));
        assert!(err.contains("required in production"));
    }

    #[test]
    fn test_jwt_secret_minimum_length_in_production() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let _unset = EnvGuard::remove_vars(&["SECRET"]);
        let _guard = EnvGuard::new(&[("JWT_SECRET", "short")]);

        let err = Config::load_jwt_secret(true).unwrap_err().to_string();
        assert!(err.contains("at least 32 characters"));
    }

    #[test]
    fn test_jwt_secret_valid_in_production() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let secret = "a".repeat(MIN_JWT_SECRET_LENGTH);
        let _guard = EnvGuard::new(&[("JWT_SECRET", &secret)]);

        assert_eq!(Config::load_jwt_secret(true).unwrap(), secret);
    }

    #[test]
    fn test_jwt_secret_accepts_legacy_alias() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let _unset = EnvGuard::remove_vars(&["JWT_SECRET"]);
        let _guard = EnvGuard::new(&[("SECRET", "just_a_random_secret")]);

        assert_eq!(Config::load_jwt_secret(false).unwrap(), "just_a_random_secret");
    }

    #[test]
    fn test_jwt_secret_uses_default_in_development() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let _guard = EnvGuard::remove_vars(&["JWT_SECRET", "SECRET"]);

        assert_eq!(
            Config::load_jwt_secret(false).unwrap(),
            DEVELOPMENT_JWT_SECRET
        );
    }

    #[test]
    fn test_empty_jwt_secret_fails_in_production() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let _unset = EnvGuard::remove_vars(&["SECRET"]);
        let _guard = EnvGuard::new(&[("JWT_SECRET", "")]);

        assert!(Config::load_jwt_secret(true).is_err());
    }

    #[test]
    fn test_hash_rounds_required_in_production() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let _guard = EnvGuard::remove_vars(&["HASH_ROUNDS", "SALT_ROUNDS"]);

        let err = Config::load_hash_rounds(true).unwrap_err().to_string();
        assert!(err.contains("HASH_ROUNDS"));
    }

    #[test]
    fn test_hash_rounds_from_legacy_alias() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let _unset = EnvGuard::remove_vars(&["HASH_ROUNDS"]);
        let _guard = EnvGuard::new(&[("SALT_ROUNDS", "3")]);

        assert_eq!(Config::load_hash_rounds(true).unwrap(), 3);
    }

    #[test]
    fn test_hash_rounds_rejects_garbage() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let _guard = EnvGuard::new(&[("HASH_ROUNDS", "many")]);
        assert!(Config::load_hash_rounds(false).is_err());

        let _zero = EnvGuard::new(&[("HASH_ROUNDS", "0")]);
        assert!(Config::load_hash_rounds(false).is_err());
    }

    #[test]
    fn test_hash_rounds_default_in_development() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let _guard = EnvGuard::remove_vars(&["HASH_ROUNDS", "SALT_ROUNDS"]);

        assert_eq!(
            Config::load_hash_rounds(false).unwrap(),
            DEVELOPMENT_HASH_ROUNDS
        );
    }

    #[test]
    fn test_from_env_defaults_in_development() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let _guard = EnvGuard::remove_vars(&[
            "ENVIRONMENT",
            "PORT",
            "JWT_SECRET",
            "SECRET",
            "JWT_EXPIRY",
            "HASH_ROUNDS",
            "SALT_ROUNDS",
            "CORS_ORIGINS",
            "SEED_DEMO_DATA",
        ]);

        let config = Config::from_env().unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.jwt_expiry, "1d");
        assert!(config.seed_demo_data);
        assert!(config.cors_allowed_origins.is_none());
        assert!(!config.is_production());
        assert_eq!(config.environment(), Environment::Development);
    }

    #[test]
    fn test_cors_origins_are_split_and_trimmed() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let _unset = EnvGuard::remove_vars(&["ENVIRONMENT"]);
        let _guard = EnvGuard::new(&[(
            "CORS_ORIGINS",
            "http://localhost:3000, https://murmur.example ,",
        )]);

        let config = Config::from_env().unwrap();
        assert_eq!(
            config.cors_allowed_origins,
            Some(vec![
                "http://localhost:3000".to_string(),
                "https://murmur.example".to_string()
            ])
        );
    }
}
