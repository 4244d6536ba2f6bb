//! Green API wire types
//!
//! Field names follow the provider's camelCase JSON. Inbound notification
//! types keep every field optional where the provider does not guarantee
//! it; unknown fields are ignored.

use serde::{Deserialize, Serialize};

/// Webhook event type for an inbound message
pub const INCOMING_MESSAGE_RECEIVED: &str = "incomingMessageReceived";

/// Message type discriminators inside `messageData.typeMessage`
pub const TYPE_TEXT_MESSAGE: &str = "textMessage";
pub const TYPE_FILE_MESSAGE: &str = "fileMessage";
pub const TYPE_LOCATION_MESSAGE: &str = "locationMessage";

// ---------------------------------------------------------------------------
// Outbound
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SendMessagePayload {
    pub chat_id: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SendFilePayload {
    pub chat_id: String,
    pub url_file: String,
    pub file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SendLocationPayload {
    pub chat_id: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_location: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SetSettingsPayload {
    pub webhook_url: String,
}

/// Response to any send endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub id_message: String,
}

/// Response to `getStateInstance`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceState {
    pub state_instance: String,
}

// ---------------------------------------------------------------------------
// Inbound (webhook)
// ---------------------------------------------------------------------------

/// Top-level webhook notification body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingNotification {
    pub type_webhook: String,
    #[serde(default)]
    pub sender_data: Option<SenderData>,
    #[serde(default)]
    pub message_data: Option<MessageData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderData {
    #[serde(default)]
    pub chat_id: Option<String>,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub chat_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageData {
    pub type_message: String,
    #[serde(default)]
    pub text_message_data: Option<TextMessageData>,
    #[serde(default)]
    pub file_message_data: Option<FileMessageData>,
    #[serde(default)]
    pub location_message_data: Option<LocationMessageData>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMessageData {
    pub text_message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMessageData {
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationMessageData {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub name_location: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

// ---------------------------------------------------------------------------
// Dispatched messages
// ---------------------------------------------------------------------------

/// Text message handed to `MessageHandler::handle_text`
#[derive(Debug, Clone)]
pub struct IncomingText {
    pub sender: String,
    pub sender_name: String,
    pub chat_name: String,
    pub text: String,
}

/// File message handed to `MessageHandler::handle_file`
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub sender: String,
    pub chat_name: String,
    pub file: FileMessageData,
}

/// Location message handed to `MessageHandler::handle_location`
#[derive(Debug, Clone)]
pub struct IncomingLocation {
    pub sender: String,
    pub chat_name: String,
    pub location: LocationMessageData,
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT_NOTIFICATION: &str = r#"{
        "typeWebhook": "incomingMessageReceived",
        "instanceData": {"idInstance": 7105000001, "wid": "11111111111@c.us"},
        "timestamp": 1700000000,
        "idMessage": "F0E1D2C3B4A5",
        "senderData": {
            "chatId": "34696864400@c.us",
            "sender": "34696864400@c.us",
            "senderName": "Ana",
            "chatName": "Ana"
        },
        "messageData": {
            "typeMessage": "textMessage",
            "textMessageData": {"textMessage": "I want 2 Greek yoghurt"}
        }
    }"#;

    const LOCATION_NOTIFICATION: &str = r#"{
        "typeWebhook": "incomingMessageReceived",
        "senderData": {"sender": "34696864400@c.us", "chatName": "Ana"},
        "messageData": {
            "typeMessage": "locationMessage",
            "locationMessageData": {
                "latitude": 41.38,
                "longitude": 2.17,
                "nameLocation": "Barcelona",
                "address": ""
            }
        }
    }"#;

    #[test]
    fn test_parse_text_notification() {
        let n: IncomingNotification = serde_json::from_str(TEXT_NOTIFICATION).unwrap();
        assert_eq!(n.type_webhook, INCOMING_MESSAGE_RECEIVED);

        let sender = n.sender_data.unwrap();
        assert_eq!(sender.sender.as_deref(), Some("34696864400@c.us"));
        assert_eq!(sender.sender_name.as_deref(), Some("Ana"));

        let message = n.message_data.unwrap();
        assert_eq!(message.type_message, TYPE_TEXT_MESSAGE);
        assert_eq!(
            message.text_message_data.unwrap().text_message,
            "I want 2 Greek yoghurt"
        );
    }

    #[test]
    fn test_parse_location_notification() {
        let n: IncomingNotification = serde_json::from_str(LOCATION_NOTIFICATION).unwrap();
        let location = n.message_data.unwrap().location_message_data.unwrap();
        assert_eq!(location.latitude, 41.38);
        assert_eq!(location.longitude, 2.17);
        assert_eq!(location.name_location.as_deref(), Some("Barcelona"));
    }

    #[test]
    fn test_parse_state_change_notification() {
        // Non-message events still parse; only typeWebhook is required.
        let n: IncomingNotification =
            serde_json::from_str(r#"{"typeWebhook": "stateInstanceChanged"}"#).unwrap();
        assert_eq!(n.type_webhook, "stateInstanceChanged");
        assert!(n.message_data.is_none());
    }

    #[test]
    fn test_outbound_payload_field_names() {
        let payload = SendFilePayload {
            chat_id: "34696864400@c.us".to_string(),
            url_file: "https://example.com/catalog.pdf".to_string(),
            file_name: "catalog.pdf".to_string(),
            caption: None,
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains(r#""chatId""#));
        assert!(json.contains(r#""urlFile""#));
        assert!(json.contains(r#""fileName""#));
        assert!(!json.contains("caption"));
    }
}
