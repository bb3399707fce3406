//! # OfficeHub Config
//!
//! Configuration loaded once from environment variables at process start.
//!
//! - [`jwt`]: token signing secret and lifetime
//! - [`database`]: PostgreSQL connection settings
//! - [`server`]: listen port and environment name
//! - [`cors`]: allowed browser origins
//!
//! Missing required values (`JWT_SECRET`, `DATABASE_URL`) are reported as a
//! [`ConfigError`]; the binary treats that as fatal.
//!
//! # Example
//!
//! ```ignore
//! use officehub_config::AppConfig;
//!
//! let config = AppConfig::from_env()?;
//! println!("listening on {}", config.server.port);
//! ```

pub mod cors;
pub mod database;
pub mod error;
pub mod jwt;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use jwt::JwtConfig;
pub use server::{Environment, ServerConfig};

/// Everything the server needs, loaded in one pass.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub cors: CorsConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads from an arbitrary key lookup, so tests never touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            server: ServerConfig::from_lookup(&lookup)?,
            database: DatabaseConfig::from_lookup(&lookup)?,
            jwt: JwtConfig::from_lookup(&lookup)?,
            cors: CorsConfig::from_lookup(&lookup),
        })
    }
}

pub(crate) fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(key))
}

pub(crate) fn parsed_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key).map(|v| v.trim().to_string()) {
        None => Ok(default),
        Some(v) if v.is_empty() => Ok(default),
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid { key, value: v }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_loads_with_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "a-very-long-signing-secret"),
            ("DATABASE_URL", "postgres://localhost/officehub"),
        ]))
        .unwrap();

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.jwt.expiry_seconds, 86_400);
        assert_eq!(config.database.max_connections, 10);
    }

    #[test]
    fn test_missing_secret_is_fatal() {
        let err = AppConfig::from_lookup(lookup_from(&[(
            "DATABASE_URL",
            "postgres://localhost/officehub",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn test_blank_connection_string_is_fatal() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "secret"),
            ("DATABASE_URL", "   "),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn test_invalid_port() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "secret"),
            ("DATABASE_URL", "postgres://localhost/officehub"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }
}
