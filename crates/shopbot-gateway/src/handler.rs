//! Webhook message handler wiring the assistant to the gateway client
//!
//! Text messages run a full assistant turn over the sender's accumulated
//! history; file and location messages get a fixed acknowledgement. Every
//! reply goes back out through the Green API client.

use std::sync::Arc;

use tracing::info;

use shopbot_assistant::{ConversationState, ShopAssistant};
use shopbot_core::Message;
use shopbot_whatsapp::{
    GreenClient, IncomingFile, IncomingLocation, IncomingText, MessageHandler, Result,
    WhatsAppError,
};

use crate::session::SessionStore;

/// Messages of history handed to the assistant per turn
const HISTORY_LIMIT: usize = 20;

/// Gateway-side handler for classified inbound messages
pub struct ShopHandler {
    assistant: Arc<ShopAssistant>,
    gateway: GreenClient,
    sessions: SessionStore,
}

impl ShopHandler {
    pub fn new(assistant: Arc<ShopAssistant>, gateway: GreenClient) -> Self {
        Self {
            assistant,
            gateway,
            sessions: SessionStore::new(),
        }
    }

    /// The session store, for inspection
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    async fn run_turn(&self, sender: &str, text: &str) -> Result<String> {
        let history = self.sessions.history(sender, HISTORY_LIMIT).await;
        let mut state = ConversationState::with_history(history);
        state.push_user(text);

        let reply = self
            .assistant
            .invoke(&mut state)
            .await
            .map_err(|e| WhatsAppError::Handler(e.to_string()))?;

        self.sessions.push(sender, Message::user(text)).await;
        self.sessions.push(sender, Message::assistant(&reply)).await;

        Ok(reply)
    }
}

#[async_trait::async_trait]
impl MessageHandler for ShopHandler {
    async fn handle_text(&self, msg: IncomingText) -> Result<()> {
        if msg.chat_name == msg.sender_name {
            info!("Message from {}: {}", msg.sender_name, msg.text);
        } else {
            info!(
                "Message in chat {} from {}: {}",
                msg.chat_name, msg.sender_name, msg.text
            );
        }

        let reply = self.run_turn(&msg.sender, &msg.text).await?;
        self.gateway.send_text(&msg.sender, &reply).await?;
        Ok(())
    }

    async fn handle_file(&self, msg: IncomingFile) -> Result<()> {
        info!(
            "File from {}: {}",
            msg.sender,
            msg.file.file_name.as_deref().unwrap_or("<unnamed>")
        );
        self.gateway
            .send_text(&msg.sender, "Thanks for the file!")
            .await?;
        Ok(())
    }

    async fn handle_location(&self, msg: IncomingLocation) -> Result<()> {
        info!(
            "Location from {}: {}, {}",
            msg.sender, msg.location.latitude, msg.location.longitude
        );
        self.gateway
            .send_text(&msg.sender, "Thanks for sharing your location!")
            .await?;
        Ok(())
    }
}
