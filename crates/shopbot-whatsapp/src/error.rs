//! Error types for shopbot-whatsapp

use thiserror::Error;

/// shopbot-whatsapp error type
#[derive(Error, Debug)]
pub enum WhatsAppError {
    #[error("Green API error: {0}")]
    Api(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Invalid webhook payload: {0}")]
    InvalidPayload(String),

    #[error("Handler error: {0}")]
    Handler(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for WhatsAppError {
    fn from(err: reqwest::Error) -> Self {
        WhatsAppError::Http(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, WhatsAppError>;
