//! shopbot-momo: MTN MoMo collection API client
//!
//! Wraps the provider's collection endpoints: transaction lookup, account
//! history and request-to-pay. Also carries the sandbox provisioning helper
//! used to mint API credentials during development.

pub mod client;
pub mod error;
pub mod models;

pub use client::MomoClient;
pub use error::{MomoError, Result};
pub use models::{AccessToken, Environment, PaymentRequest, SandboxCredentials, Transaction};
