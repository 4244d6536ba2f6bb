//! Green API REST client
//!
//! Thin wrapper over the provider's instance endpoints. Every call builds
//! the JSON body, posts it, and raises on non-2xx with the response body in
//! the error. No retry.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::error::{Result, WhatsAppError};
use crate::types::*;

const DEFAULT_BASE_URL: &str = "https://api.green-api.com";

/// Suffix of a WhatsApp chat address
const CHAT_SUFFIX: &str = "@c.us";

/// Green API client bound to one instance
#[derive(Debug, Clone)]
pub struct GreenClient {
    client: Client,
    instance_id: String,
    api_token: String,
    base_url: String,
}

impl GreenClient {
    /// Create a new client for the given instance
    pub fn new(instance_id: impl Into<String>, api_token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(WhatsAppError::from)?;

        Ok(Self {
            client,
            instance_id: instance_id.into(),
            api_token: api_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Override the base URL (for tests or regional endpoints)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Normalize a recipient into chat-address form. Appends the suffix
    /// exactly once; ids already carrying it pass through unchanged.
    pub fn chat_id(to: &str) -> String {
        if to.contains(CHAT_SUFFIX) {
            to.to_string()
        } else {
            format!("{}{}", to, CHAT_SUFFIX)
        }
    }

    fn endpoint(&self, method: &str) -> String {
        format!(
            "{}/waInstance{}/{}/{}",
            self.base_url, self.instance_id, method, self.api_token
        )
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.endpoint(method);
        debug!("POST {}", method);

        let response = self.client.post(&url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!("{} failed: {} - {}", method, status, text);
            return Err(WhatsAppError::Api(format!("{}: {} - {}", method, status, text)));
        }

        Ok(response.json().await?)
    }

    /// Send a text message
    pub async fn send_text(&self, to: &str, message: &str) -> Result<SendMessageResponse> {
        let payload = SendMessagePayload {
            chat_id: Self::chat_id(to),
            message: message.to_string(),
        };

        let response = self.post_json("sendMessage", &payload).await?;
        info!("Message sent to {}", to);
        Ok(response)
    }

    /// Send a file by URL, with an optional caption
    pub async fn send_file(
        &self,
        to: &str,
        file_url: &str,
        caption: Option<&str>,
    ) -> Result<SendMessageResponse> {
        let file_name = file_url.rsplit('/').next().unwrap_or(file_url).to_string();

        let payload = SendFilePayload {
            chat_id: Self::chat_id(to),
            url_file: file_url.to_string(),
            file_name,
            caption: caption.map(|c| c.to_string()),
        };

        let response = self.post_json("sendFileByUrl", &payload).await?;
        info!("File sent to {}", to);
        Ok(response)
    }

    /// Send a location, with an optional place name
    pub async fn send_location(
        &self,
        to: &str,
        latitude: f64,
        longitude: f64,
        name: Option<&str>,
    ) -> Result<SendMessageResponse> {
        let payload = SendLocationPayload {
            chat_id: Self::chat_id(to),
            latitude,
            longitude,
            name_location: name.map(|n| n.to_string()),
        };

        let response = self.post_json("sendLocation", &payload).await?;
        info!("Location sent to {}", to);
        Ok(response)
    }

    /// Fetch the authorization state of the instance
    pub async fn instance_status(&self) -> Result<InstanceState> {
        let url = self.endpoint("getStateInstance");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!("getStateInstance failed: {} - {}", status, text);
            return Err(WhatsAppError::Api(format!(
                "getStateInstance: {} - {}",
                status, text
            )));
        }

        Ok(response.json().await?)
    }

    /// Point the provider's webhook delivery at `url`
    pub async fn set_webhook_url(&self, url: &str) -> Result<()> {
        let payload = SetSettingsPayload {
            webhook_url: url.to_string(),
        };

        let _: serde_json::Value = self.post_json("setSettings", &payload).await?;
        info!("Webhook URL set to {}", url);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_id_appends_suffix_once() {
        assert_eq!(GreenClient::chat_id("34696864400"), "34696864400@c.us");
        assert_eq!(GreenClient::chat_id("34696864400@c.us"), "34696864400@c.us");
    }

    #[test]
    fn test_endpoint_layout() {
        let client = GreenClient::new("7105000001", "token123").unwrap();
        assert_eq!(
            client.endpoint("sendMessage"),
            "https://api.green-api.com/waInstance7105000001/sendMessage/token123"
        );
    }

    #[test]
    fn test_base_url_override() {
        let client = GreenClient::new("1", "t")
            .unwrap()
            .with_base_url("http://localhost:9");
        assert!(client.endpoint("getStateInstance").starts_with("http://localhost:9/"));
    }
}
