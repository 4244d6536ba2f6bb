//! shopbot-whatsapp: WhatsApp messaging gateway via the Green API
//!
//! Provides the REST client for outbound messages and the axum webhook
//! server for inbound notifications. Inbound messages are dispatched to an
//! injected [`MessageHandler`] implementation.

pub mod client;
pub mod error;
pub mod types;
pub mod webhook;

pub use client::GreenClient;
pub use error::{Result, WhatsAppError};
pub use types::{IncomingFile, IncomingLocation, IncomingText};
pub use webhook::{MessageHandler, WebhookServer};
