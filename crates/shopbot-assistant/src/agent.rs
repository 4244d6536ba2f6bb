//! The shop assistant agent
//!
//! One invocation takes the accumulated history, lets the model call the
//! shop tools as often as it needs, and ends with exactly one new assistant
//! message appended to the state. Tool traffic stays internal. The USD cost
//! of every model call is booked into the shared ledger under this agent's
//! type name.

use tracing::{debug, info, warn};

use shopbot_core::llm::{cost_usd, LlmClient, Message, MessagesRequest};
use shopbot_core::{CostLedger, Error, Result, ToolManager, ToolResult};

use crate::prompt::system_prompt;
use crate::state::{ConversationState, NEXT_END};
use crate::tools::register_shop_tools;

const DEFAULT_MAX_ITERATIONS: usize = 10;
const MAX_REPLY_TOKENS: u64 = 1024;

/// Shop assistant bound to an LLM client, the shop tools and a cost ledger
pub struct ShopAssistant {
    client: LlmClient,
    tools: ToolManager,
    ledger: CostLedger,
    system_prompt: String,
    max_iterations: usize,
}

impl ShopAssistant {
    /// Ledger key for this agent
    pub const AGENT_TYPE: &'static str = "ShopAssistant";

    /// Create the assistant with the standard tool set
    pub fn new(client: LlmClient, ledger: CostLedger) -> Self {
        let mut tools = ToolManager::new();
        register_shop_tools(&mut tools);

        Self {
            client,
            tools,
            ledger,
            system_prompt: system_prompt(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Number of registered tools
    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    /// Run one conversational turn over the accumulated history.
    ///
    /// On success the reply text is returned and appended to
    /// `state.messages`; the routing hint is moved to the end state.
    pub async fn invoke(&self, state: &mut ConversationState) -> Result<String> {
        let tools = self.tools.definitions();
        let mut messages = state.messages.clone();

        for iteration in 1..=self.max_iterations {
            let request = MessagesRequest {
                model: self.client.model().to_string(),
                max_tokens: MAX_REPLY_TOKENS,
                system: Some(self.system_prompt.clone()),
                messages: messages.clone(),
                tools: Some(tools.clone()),
            };

            let response = self.client.messages(request).await?;
            self.record_cost(&response.usage).await;

            match response.stop_reason.as_str() {
                "end_turn" | "stop_sequence" | "stop" => {
                    let reply = response.text();
                    state.push_assistant(&reply);
                    state.next = NEXT_END.to_string();
                    debug!("Turn finished after {} model calls", iteration);
                    return Ok(reply);
                }
                "tool_use" | "tool_calls" => {
                    let tool_uses = response.tool_uses();
                    if tool_uses.is_empty() {
                        warn!("tool_use stop_reason without tool calls");
                        continue;
                    }

                    let mut tool_results = Vec::new();
                    for (id, name, input) in tool_uses {
                        debug!("Executing tool {} with input {}", name, input);
                        let result = match self.tools.execute(&name, input).await {
                            Ok(result) => result,
                            // Unknown tool names go back to the model as an
                            // error result instead of ending the turn.
                            Err(e) => ToolResult::error(e.to_string()),
                        };
                        tool_results.push(shopbot_core::MessageContent::ToolResult {
                            tool_use_id: id,
                            content: result.output,
                            is_error: result.is_error,
                        });
                    }

                    messages.push(Message {
                        role: "assistant".to_string(),
                        content: response.content,
                    });
                    messages.push(Message {
                        role: "user".to_string(),
                        content: tool_results,
                    });
                }
                other => {
                    return Err(Error::LlmApi(format!("Unknown stop_reason: {}", other)));
                }
            }
        }

        Err(Error::Other(format!(
            "Agent gave no final reply within {} model calls",
            self.max_iterations
        )))
    }

    async fn record_cost(&self, usage: &Option<shopbot_core::llm::Usage>) {
        if let Some(usage) = usage {
            let cost = cost_usd(self.client.model(), usage);
            self.ledger.record(Self::AGENT_TYPE, cost).await;
            info!(
                "Booked {:.6} USD for {} (running total {:.6})",
                cost,
                Self::AGENT_TYPE,
                self.ledger.total(Self::AGENT_TYPE).await
            );
        }
    }
}
