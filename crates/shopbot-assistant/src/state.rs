//! Turn-local conversation state

use shopbot_core::Message;

/// Routing hint naming the step that should process the state next
pub const NEXT_ASSISTANT: &str = "shop_assistant";
/// Routing hint for a finished turn
pub const NEXT_END: &str = "end";

/// The state threaded through one agent invocation: the ordered message
/// history plus a routing hint. Lives for a single turn; history that
/// should survive a turn is the caller's concern.
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    pub messages: Vec<Message>,
    pub next: String,
}

impl ConversationState {
    /// Fresh state routed at the assistant
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            next: NEXT_ASSISTANT.to_string(),
        }
    }

    /// State seeded with prior history
    pub fn with_history(messages: Vec<Message>) -> Self {
        Self {
            messages,
            next: NEXT_ASSISTANT.to_string(),
        }
    }

    /// Append the user's inbound message
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.messages.push(Message::user(text));
    }

    /// Append the assistant's reply
    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.messages.push(Message::assistant(text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_routes_to_assistant() {
        let state = ConversationState::new();
        assert!(state.messages.is_empty());
        assert_eq!(state.next, NEXT_ASSISTANT);
    }

    #[test]
    fn test_messages_append_in_order() {
        let mut state = ConversationState::new();
        state.push_user("2 labneh please");
        state.push_assistant("That will be 2000.");
        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.messages[0].role, "user");
        assert_eq!(state.messages[1].role, "assistant");
    }

    #[test]
    fn test_with_history_keeps_messages() {
        let history = vec![Message::user("hi"), Message::assistant("hello")];
        let state = ConversationState::with_history(history);
        assert_eq!(state.messages.len(), 2);
    }
}
