//! Tool trait definition

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::Result;

/// Outcome of one tool execution. An `is_error` result is fed back to the
/// model as a recoverable condition, not raised to the caller.
#[derive(Debug, Clone)]
pub struct ToolResult {
    pub output: String,
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful tool result
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            is_error: false,
        }
    }

    /// Create an error tool result
    pub fn error(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            is_error: true,
        }
    }
}

/// An operation the model can invoke by name with JSON arguments.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name, as referenced in tool-call requests
    fn name(&self) -> &str;

    /// Description shown to the model when selecting tools
    fn description(&self) -> &str;

    /// JSON schema of the input parameters
    fn input_schema(&self) -> JsonValue;

    /// Execute with the model-provided input
    async fn execute(&self, input: JsonValue) -> Result<ToolResult>;
}
