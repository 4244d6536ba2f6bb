//! Error types for shopbot-momo

use thiserror::Error;

/// shopbot-momo error type
#[derive(Error, Debug)]
pub enum MomoError {
    #[error("MoMo API error: {0}")]
    Api(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, MomoError>;
