//! shopbot-core: Shop Gateway Core Library
//!
//! Shared building blocks for the shopbot workspace: configuration,
//! the LLM HTTP client, the tool system and the process-wide cost ledger.

pub mod config;
pub mod costs;
pub mod error;
pub mod llm;
pub mod tool;

pub use config::{Config, LlmConfig, LlmProvider, MomoConfig, WebhookConfig, WhatsAppConfig};
pub use costs::CostLedger;
pub use error::{Error, Result};
pub use llm::{LlmClient, Message, MessageContent, ToolDefinition};
pub use tool::{Tool, ToolManager, ToolResult};
