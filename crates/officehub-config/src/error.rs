use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable `{0}` is not set")]
    Missing(&'static str),

    #[error("environment variable `{key}` has invalid value `{value}`")]
    Invalid { key: &'static str, value: String },
}
