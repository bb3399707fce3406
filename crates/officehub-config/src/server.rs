use std::fmt;
use std::str::FromStr;

use crate::{ConfigError, parsed_or};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            "test" => Ok(Environment::Test),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Test => "test",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub environment: Environment,
    /// Directory for the daily rolling JSON log, if any.
    pub log_dir: Option<String>,
}

impl ServerConfig {
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            port: parsed_or(lookup, "PORT", 5000)?,
            environment: parsed_or(lookup, "APP_ENV", Environment::Development)?,
            log_dir: lookup("LOG_DIR")
                .map(|dir| dir.trim().to_string())
                .filter(|dir| !dir.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!("Production".parse(), Ok(Environment::Production));
        assert_eq!("dev".parse(), Ok(Environment::Development));
        assert!("staging".parse::<Environment>().is_err());
        assert_eq!(Environment::Test.to_string(), "test");
    }
}
