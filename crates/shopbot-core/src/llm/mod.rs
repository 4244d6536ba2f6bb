//! LLM client and wire types

pub mod client;
pub mod pricing;
pub mod types;

pub use client::LlmClient;
pub use pricing::cost_usd;
pub use types::{
    Message, MessageContent, MessagesRequest, MessagesResponse, ToolDefinition, Usage,
};
