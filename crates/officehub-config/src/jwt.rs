use std::fmt;

use crate::{ConfigError, parsed_or, required};

/// Default token lifetime: one day.
pub const DEFAULT_EXPIRY_SECONDS: i64 = 86_400;

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_seconds: i64,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiry_seconds", &self.expiry_seconds)
            .finish()
    }
}

impl JwtConfig {
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let expiry_seconds = parsed_or(lookup, "JWT_EXPIRY_SECONDS", DEFAULT_EXPIRY_SECONDS)?;
        if expiry_seconds <= 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_EXPIRY_SECONDS",
                value: expiry_seconds.to_string(),
            });
        }

        Ok(Self {
            secret: required(lookup, "JWT_SECRET")?,
            expiry_seconds,
        })
    }
}
