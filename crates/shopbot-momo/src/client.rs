//! MTN MoMo collection client
//!
//! All operations carry the provider's fixed header set and raise on
//! non-2xx with the response body in the error. No retry.

use chrono::{DateTime, Utc};
use reqwest::Client;
use tracing::{debug, error, info};

use crate::error::{MomoError, Result};
use crate::models::*;

/// MoMo collection API client
#[derive(Debug, Clone)]
pub struct MomoClient {
    client: Client,
    api_key: String,
    user_id: String,
    primary_key: String,
    environment: Environment,
    base_url: String,
}

impl MomoClient {
    /// Create a new client
    pub fn new(
        api_key: impl Into<String>,
        user_id: impl Into<String>,
        primary_key: impl Into<String>,
        environment: Environment,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(MomoError::Http)?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            user_id: user_id.into(),
            primary_key: primary_key.into(),
            environment,
            base_url: environment.base_url().to_string(),
        })
    }

    /// Override the base URL (for tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Attach the provider-required headers
    fn with_headers(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("X-Reference-Id", &self.user_id)
            .header("X-Target-Environment", self.environment.as_str())
            .header("Ocp-Apim-Subscription-Key", &self.primary_key)
    }

    async fn check_status(method: &str, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!("{} failed: {} - {}", method, status, text);
            return Err(MomoError::Api(format!("{}: {} - {}", method, status, text)));
        }
        Ok(response)
    }

    /// Check transaction details by id
    pub async fn check_transaction(&self, transaction_id: &str) -> Result<Transaction> {
        let url = format!("{}/collection/v1_0/transaction/{}", self.base_url, transaction_id);
        debug!("GET {}", url);

        let response = self.with_headers(self.client.get(&url)).send().await?;
        let response = Self::check_status("check_transaction", response).await?;

        let details: TransactionDetails = response
            .json()
            .await
            .map_err(|e| MomoError::Parse(e.to_string()))?;

        info!("Transaction {} checked", transaction_id);

        Ok(Transaction {
            date: details.date,
            amount: details.amount,
            phone_number: details.payer.map(|p| p.party_id),
            transaction_id: Some(transaction_id.to_string()),
        })
    }

    /// Last transactions for an account holder, newest first
    pub async fn list_transactions(&self, phone_number: &str, limit: u32) -> Result<Vec<Transaction>> {
        let url = format!(
            "{}/collection/v1_0/accountholder/{}/transactions",
            self.base_url, phone_number
        );
        debug!("GET {}", url);

        let response = self
            .with_headers(self.client.get(&url).query(&[("limit", limit)]))
            .send()
            .await?;
        let response = Self::check_status("list_transactions", response).await?;

        let page: TransactionsPage = response
            .json()
            .await
            .map_err(|e| MomoError::Parse(e.to_string()))?;

        info!("Fetched {} transactions for {}", page.transactions.len(), phone_number);

        Ok(page
            .transactions
            .into_iter()
            .map(|t| Transaction {
                date: t.date,
                amount: t.amount,
                phone_number: Some(phone_number.to_string()),
                transaction_id: t.transaction_id,
            })
            .collect())
    }

    /// Request a payment from a phone number
    pub async fn request_payment(
        &self,
        phone_number: &str,
        amount: f64,
        currency: &str,
        message: Option<&str>,
    ) -> Result<PaymentRequest> {
        let url = format!("{}/collection/v1_0/requesttopay", self.base_url);

        let payload = RequestToPayPayload {
            amount: amount.to_string(),
            currency: currency.to_string(),
            external_id: Self::external_id(Utc::now()),
            payer: Party {
                party_id_type: "MSISDN".to_string(),
                party_id: phone_number.to_string(),
            },
            payer_message: message.unwrap_or("Payment request").to_string(),
            payee_note: "Payment request".to_string(),
        };

        debug!("POST {}", url);

        let response = self
            .with_headers(self.client.post(&url).json(&payload))
            .send()
            .await?;
        let response = Self::check_status("request_payment", response).await?;

        let body: RequestToPayResponse = response
            .json()
            .await
            .map_err(|e| MomoError::Parse(e.to_string()))?;

        info!("Payment request sent to {}", phone_number);

        Ok(PaymentRequest {
            status: body.status,
            transaction_id: body.transaction_id,
            amount,
            phone_number: phone_number.to_string(),
        })
    }

    /// Create an access token for the collection product. Authenticates
    /// with the user id / API key pair over HTTP basic auth.
    pub async fn create_access_token(&self) -> Result<AccessToken> {
        let url = format!("{}/collection/token/", self.base_url);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.user_id, Some(&self.api_key))
            .header("X-Target-Environment", self.environment.as_str())
            .header("Ocp-Apim-Subscription-Key", &self.primary_key)
            .send()
            .await?;
        let response = Self::check_status("create_access_token", response).await?;

        response
            .json()
            .await
            .map_err(|e| MomoError::Parse(e.to_string()))
    }

    /// Mint sandbox credentials: create an API user under a fresh reference
    /// id, then request its API key. Development helper; the returned
    /// triple goes straight into configuration.
    pub async fn provision_sandbox(
        primary_key: &str,
        callback_host: &str,
    ) -> Result<SandboxCredentials> {
        let base_url = Environment::Sandbox.base_url();
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(MomoError::Http)?;

        let reference_id = uuid::Uuid::new_v4().to_string();

        let response = client
            .post(format!("{}/v1_0/apiuser", base_url))
            .header("X-Reference-Id", &reference_id)
            .header("X-Target-Environment", Environment::Sandbox.as_str())
            .header("Ocp-Apim-Subscription-Key", primary_key)
            .json(&CreateApiUserPayload {
                provider_callback_host: callback_host.to_string(),
            })
            .send()
            .await?;
        Self::check_status("create_api_user", response).await?;

        info!("Sandbox API user {} created", reference_id);

        let response = client
            .post(format!("{}/v1_0/apiuser/{}/apikey", base_url, reference_id))
            .header("X-Reference-Id", &reference_id)
            .header("X-Target-Environment", Environment::Sandbox.as_str())
            .header("Ocp-Apim-Subscription-Key", primary_key)
            .send()
            .await?;
        let response = Self::check_status("create_api_key", response).await?;

        let key: CreateApiKeyResponse = response
            .json()
            .await
            .map_err(|e| MomoError::Parse(e.to_string()))?;

        Ok(SandboxCredentials {
            api_key: key.api_key,
            user_id: reference_id,
            primary_key: primary_key.to_string(),
        })
    }

    /// External reference id for a request-to-pay, derived from the clock
    fn external_id(now: DateTime<Utc>) -> String {
        format!("REQ{}", now.format("%Y%m%d%H%M%S"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_client() -> MomoClient {
        MomoClient::new("api_key", "user_id", "primary_key", Environment::Sandbox).unwrap()
    }

    #[test]
    fn test_base_url_follows_environment() {
        let client = test_client();
        assert_eq!(client.base_url, "https://sandbox.momodeveloper.mtn.com");

        let client =
            MomoClient::new("k", "u", "p", Environment::Production).unwrap();
        assert_eq!(client.base_url, "https://momodeveloper.mtn.com");
    }

    #[test]
    fn test_external_id_format() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(MomoClient::external_id(now), "REQ20240102030405");
    }

    #[test]
    fn test_fixed_header_set() {
        let client = test_client();
        let request = client
            .with_headers(client.client.get("http://localhost/collection"))
            .build()
            .unwrap();

        let headers = request.headers();
        assert_eq!(headers.get("X-Reference-Id").unwrap(), "user_id");
        assert_eq!(headers.get("X-Target-Environment").unwrap(), "sandbox");
        assert_eq!(headers.get("Ocp-Apim-Subscription-Key").unwrap(), "primary_key");
    }

    #[test]
    fn test_base_url_override() {
        let client = test_client().with_base_url("http://localhost:9");
        assert_eq!(client.base_url, "http://localhost:9");
    }
}
