//! Tool system
//!
//! Tools are the operations the model may invoke during a turn. The trait
//! and manager here are provider-agnostic; definitions are handed to the
//! LLM client as part of the request.

pub mod definition;
pub mod manager;
pub mod traits;

pub use definition::SchemaBuilder;
pub use manager::ToolManager;
pub use traits::{Tool, ToolResult};
