use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    MissingFile(String),
    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}
