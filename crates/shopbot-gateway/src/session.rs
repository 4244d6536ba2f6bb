//! Per-sender conversation history, in memory only
//!
//! History lives for the lifetime of the process and is dropped on restart;
//! there is deliberately no durable store behind it.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use shopbot_core::Message;

/// One sender's conversation
#[derive(Debug, Clone)]
pub struct Session {
    pub messages: Vec<Message>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Default for Session {
    fn default() -> Self {
        let now = chrono::Utc::now();
        Self {
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// In-memory session store keyed by sender id
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Message history for a sender, most recent `limit` messages
    pub async fn history(&self, key: &str, limit: usize) -> Vec<Message> {
        let sessions = self.sessions.read().await;
        match sessions.get(key) {
            Some(session) => {
                let start = session.messages.len().saturating_sub(limit);
                session.messages[start..].to_vec()
            }
            None => Vec::new(),
        }
    }

    /// Append a message to a sender's history
    pub async fn push(&self, key: &str, message: Message) {
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(key.to_string()).or_default();
        session.messages.push(message);
        session.updated_at = chrono::Utc::now();
    }

    /// Drop a sender's history
    pub async fn clear(&self, key: &str) {
        let mut sessions = self.sessions.write().await;
        sessions.remove(key);
    }

    /// Number of active sessions
    pub async fn session_count(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }
}

impl Clone for SessionStore {
    fn clone(&self) -> Self {
        Self {
            sessions: Arc::clone(&self.sessions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_history() {
        let store = SessionStore::new();
        assert!(store.history("34696864400@c.us", 20).await.is_empty());
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_push_and_history() {
        let store = SessionStore::new();
        store.push("a", Message::user("hi")).await;
        store.push("a", Message::assistant("hello")).await;

        let history = store.history("a", 20).await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, "user");
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_history_respects_limit() {
        let store = SessionStore::new();
        for i in 0..30 {
            store.push("a", Message::user(format!("msg {}", i))).await;
        }

        let history = store.history("a", 20).await;
        assert_eq!(history.len(), 20);
        assert_eq!(history[0].text_content(), "msg 10");
        assert_eq!(history[19].text_content(), "msg 29");
    }

    #[tokio::test]
    async fn test_clear() {
        let store = SessionStore::new();
        store.push("a", Message::user("hi")).await;
        store.clear("a").await;
        assert!(store.history("a", 20).await.is_empty());
    }
}
