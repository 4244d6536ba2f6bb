//! Webhook server for inbound Green API notifications
//!
//! Every delivery is authenticated against the configured bearer secret,
//! classified by event and message type, and dispatched to the injected
//! [`MessageHandler`]. Unrecognized or malformed payloads are acknowledged
//! and dropped; only a failing handler produces a 500.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use crate::error::{Result, WhatsAppError};
use crate::types::*;

/// Receiver for classified inbound messages.
///
/// All methods default to a no-op, so an implementation only overrides the
/// message types it cares about.
#[async_trait::async_trait]
pub trait MessageHandler: Send + Sync {
    async fn handle_text(&self, _msg: IncomingText) -> Result<()> {
        Ok(())
    }

    async fn handle_file(&self, _msg: IncomingFile) -> Result<()> {
        Ok(())
    }

    async fn handle_location(&self, _msg: IncomingLocation) -> Result<()> {
        Ok(())
    }
}

/// Webhook route state
#[derive(Clone)]
struct WebhookState {
    secret_token: String,
    handler: Arc<dyn MessageHandler>,
}

/// Webhook server
pub struct WebhookServer {
    addr: SocketAddr,
    path: String,
    state: WebhookState,
}

impl WebhookServer {
    /// Create a new webhook server serving `path` on `addr`
    pub fn new(
        addr: SocketAddr,
        path: impl Into<String>,
        secret_token: impl Into<String>,
        handler: Arc<dyn MessageHandler>,
    ) -> Self {
        Self {
            addr,
            path: path.into(),
            state: WebhookState {
                secret_token: secret_token.into(),
                handler,
            },
        }
    }

    /// Build the router; exposed separately so tests can drive it directly.
    pub fn router(&self) -> Router {
        Router::new()
            .route(&self.path, post(handle_webhook))
            .layer(TraceLayer::new_for_http())
            .with_state(Arc::new(self.state.clone()))
    }

    /// Bind and serve until the process exits
    pub async fn start(self) -> Result<()> {
        info!("Starting webhook server on {}{}", self.addr, self.path);

        let app = self.router();

        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .map_err(|e| WhatsAppError::Config(e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| WhatsAppError::Http(e.to_string()))?;

        Ok(())
    }
}

async fn handle_webhook(
    State(state): State<Arc<WebhookState>>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    if token != Some(state.secret_token.as_str()) {
        warn!("Unauthorized webhook attempt");
        return StatusCode::UNAUTHORIZED;
    }

    let notification: IncomingNotification = match serde_json::from_slice(&body) {
        Ok(n) => n,
        Err(e) => {
            // Unparseable deliveries are acknowledged so the provider
            // does not keep redelivering them.
            debug!("Dropping malformed webhook body: {}", e);
            return StatusCode::OK;
        }
    };

    if notification.type_webhook != INCOMING_MESSAGE_RECEIVED {
        debug!("Ignoring webhook event: {}", notification.type_webhook);
        return StatusCode::OK;
    }

    match dispatch(&state, notification).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            error!("Error handling message: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Classify the message and invoke the matching handler hook. Incomplete
/// payloads are dropped here; only handler failures surface as errors.
async fn dispatch(state: &WebhookState, notification: IncomingNotification) -> Result<()> {
    let Some(message_data) = notification.message_data else {
        debug!("Message event without messageData, dropping");
        return Ok(());
    };

    let sender_data = notification.sender_data.unwrap_or_default();
    let sender = sender_data.sender.unwrap_or_default();
    let sender_name = sender_data.sender_name.unwrap_or_default();
    let chat_name = sender_data.chat_name.unwrap_or_default();

    match message_data.type_message.as_str() {
        TYPE_TEXT_MESSAGE => {
            let Some(text_data) = message_data.text_message_data else {
                debug!("textMessage without textMessageData, dropping");
                return Ok(());
            };
            info!("Received text message from {}", sender);
            state
                .handler
                .handle_text(IncomingText {
                    sender,
                    sender_name,
                    chat_name,
                    text: text_data.text_message,
                })
                .await
        }
        TYPE_FILE_MESSAGE => {
            let Some(file) = message_data.file_message_data else {
                debug!("fileMessage without fileMessageData, dropping");
                return Ok(());
            };
            info!("Received file from {}", sender);
            state
                .handler
                .handle_file(IncomingFile {
                    sender,
                    chat_name,
                    file,
                })
                .await
        }
        TYPE_LOCATION_MESSAGE => {
            let Some(location) = message_data.location_message_data else {
                debug!("locationMessage without locationMessageData, dropping");
                return Ok(());
            };
            info!("Received location from {}", sender);
            state
                .handler
                .handle_location(IncomingLocation {
                    sender,
                    chat_name,
                    location,
                })
                .await
        }
        other => {
            debug!("Ignoring message type: {}", other);
            Ok(())
        }
    }
}
