use crate::{ConfigError, parsed_or, required};

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            url: required(lookup, "DATABASE_URL")?,
            max_connections: parsed_or(lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
        })
    }
}
