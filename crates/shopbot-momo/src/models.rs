//! Data models for the MoMo collection API

use serde::{Deserialize, Serialize};

/// Target environment, fixed base URL per environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
}

impl Environment {
    /// Parse from configuration; anything other than "production" is sandbox.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Sandbox,
        }
    }

    /// Value of the X-Target-Environment header
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Sandbox => "sandbox",
            Environment::Production => "production",
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => "https://sandbox.momodeveloper.mtn.com",
            Environment::Production => "https://momodeveloper.mtn.com",
        }
    }
}

/// Read-only projection of a provider transaction
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub date: Option<String>,
    pub amount: Option<String>,
    pub phone_number: Option<String>,
    pub transaction_id: Option<String>,
}

/// Result of a request-to-pay call
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub status: Option<String>,
    pub transaction_id: Option<String>,
    pub amount: f64,
    pub phone_number: String,
}

/// Sandbox credentials minted by the provisioning helper
#[derive(Debug, Clone)]
pub struct SandboxCredentials {
    pub api_key: String,
    pub user_id: String,
    pub primary_key: String,
}

/// Access token for the collection product
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TransactionDetails {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub payer: Option<Party>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Party {
    pub party_id_type: String,
    pub party_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TransactionsPage {
    #[serde(default)]
    pub transactions: Vec<TransactionDetails>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RequestToPayPayload {
    pub amount: String,
    pub currency: String,
    pub external_id: String,
    pub payer: Party,
    pub payer_message: String,
    pub payee_note: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RequestToPayResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateApiUserPayload {
    pub provider_callback_host: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateApiKeyResponse {
    pub api_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("sandbox"), Environment::Sandbox);
        assert_eq!(Environment::parse("Production"), Environment::Production);
        assert_eq!(Environment::parse("anything"), Environment::Sandbox);
    }

    #[test]
    fn test_environment_base_urls() {
        assert_eq!(
            Environment::Sandbox.base_url(),
            "https://sandbox.momodeveloper.mtn.com"
        );
        assert_eq!(
            Environment::Production.base_url(),
            "https://momodeveloper.mtn.com"
        );
    }

    #[test]
    fn test_transaction_details_parsing() {
        let json = r#"{
            "amount": "100",
            "currency": "EUR",
            "financialTransactionId": "363440463",
            "externalId": "REQ20240101120000",
            "date": "2024-01-01",
            "payer": {"partyIdType": "MSISDN", "partyId": "46733123450"},
            "status": "SUCCESSFUL"
        }"#;
        let details: TransactionDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.amount.as_deref(), Some("100"));
        assert_eq!(details.date.as_deref(), Some("2024-01-01"));
        assert_eq!(details.payer.unwrap().party_id, "46733123450");
    }

    #[test]
    fn test_request_to_pay_payload_field_names() {
        let payload = RequestToPayPayload {
            amount: "100".to_string(),
            currency: "EUR".to_string(),
            external_id: "REQ20240101120000".to_string(),
            payer: Party {
                party_id_type: "MSISDN".to_string(),
                party_id: "46733123450".to_string(),
            },
            payer_message: "Payment request".to_string(),
            payee_note: "Payment request".to_string(),
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains(r#""externalId""#));
        assert!(json.contains(r#""payerMessage""#));
        assert!(json.contains(r#""partyIdType":"MSISDN""#));
    }
}
