//! Configuration management
//!
//! Settings are resolved in this order:
//! 1. Environment variables
//! 2. `shopbot.toml` configuration file
//! 3. Defaults
//!
//! Inside the config file, `${VAR_NAME}` expands to the value of the
//! environment variable (empty string when unset).

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Error;

/// LLM provider type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// OpenAI-compatible chat completions API
    #[default]
    OpenAi,
    /// Anthropic Claude messages API
    Claude,
}

impl LlmProvider {
    fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "claude" | "anthropic" => LlmProvider::Claude,
            _ => LlmProvider::OpenAi,
        }
    }
}

/// LLM configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key
    pub api_key: String,

    /// Model to use
    #[serde(default = "default_model")]
    pub model: String,

    /// API provider
    #[serde(default)]
    pub provider: LlmProvider,

    /// Base URL (optional, for custom endpoints)
    pub base_url: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            provider: LlmProvider::OpenAi,
            base_url: None,
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

/// Green API instance credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatsAppConfig {
    /// Instance id assigned by the provider
    pub instance_id: String,
    /// Instance API token
    pub api_token: String,
}

/// MTN MoMo collection credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MomoConfig {
    /// Per-user API key (pairs with the user id for token creation)
    pub api_key: String,
    /// API user id, sent as X-Reference-Id
    pub user_id: String,
    /// Subscription primary key, sent as Ocp-Apim-Subscription-Key
    pub primary_key: String,
    /// Target environment: "sandbox" or "production"
    #[serde(default = "default_momo_environment")]
    pub environment: String,
}

fn default_momo_environment() -> String {
    "sandbox".to_string()
}

/// Inbound webhook settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Bearer secret expected on every delivery
    pub secret_token: String,

    /// Listen port
    #[serde(default = "default_webhook_port")]
    pub port: u16,

    /// Route path
    #[serde(default = "default_webhook_path")]
    pub path: String,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            secret_token: String::new(),
            port: default_webhook_port(),
            path: default_webhook_path(),
        }
    }
}

fn default_webhook_port() -> u16 {
    3000
}

fn default_webhook_path() -> String {
    "/webhook".to_string()
}

/// Main configuration for shopbot
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// LLM configuration
    #[serde(default)]
    pub llm: LlmConfig,

    /// Messaging provider credentials (absent when only the CLI is used)
    pub whatsapp: Option<WhatsAppConfig>,

    /// Payment provider credentials (absent when payments are unused)
    pub momo: Option<MomoConfig>,

    /// Webhook server settings
    #[serde(default)]
    pub webhook: WebhookConfig,
}

impl Config {
    /// Expand `${VAR_NAME}` occurrences against the process environment.
    /// Unset variables expand to the empty string.
    fn expand_env_vars(value: &str) -> String {
        let mut result = String::with_capacity(value.len());
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next();
                let mut var_name = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    var_name.push(c);
                }
                if let Ok(env_value) = std::env::var(&var_name) {
                    result.push_str(&env_value);
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// Load configuration from a TOML file, then apply environment overrides.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let toml_content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let expanded = Self::expand_env_vars(&toml_content);

        let mut config: Config = toml::from_str(&expanded)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from `./shopbot.toml` when present, otherwise from
    /// environment variables alone.
    pub fn load() -> crate::Result<Self> {
        if Path::new("shopbot.toml").exists() {
            return Self::from_toml_file("shopbot.toml");
        }
        Self::from_env()
    }

    /// Load configuration purely from environment variables.
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();
        config.apply_env_overrides();

        if config.llm.api_key.is_empty() {
            return Err(Error::Config("LLM_API_KEY not set".to_string()));
        }

        Ok(config)
    }

    /// Overlay environment variables onto whatever was loaded so far.
    fn apply_env_overrides(&mut self) {
        if let Ok(api_key) = std::env::var("LLM_API_KEY") {
            self.llm.api_key = api_key;
        } else if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            self.llm.api_key = api_key;
        }
        if let Ok(model) = std::env::var("LLM_MODEL") {
            if !model.is_empty() {
                self.llm.model = model;
            }
        }
        if let Ok(provider) = std::env::var("LLM_PROVIDER") {
            if !provider.is_empty() {
                self.llm.provider = LlmProvider::parse(&provider);
            }
        }
        if let Ok(base_url) = std::env::var("LLM_BASE_URL") {
            if !base_url.is_empty() {
                self.llm.base_url = Some(base_url);
            }
        }

        if let (Ok(instance_id), Ok(api_token)) = (
            std::env::var("GREEN_API_INSTANCE_ID"),
            std::env::var("GREEN_API_INSTANCE_TOKEN"),
        ) {
            self.whatsapp = Some(WhatsAppConfig {
                instance_id,
                api_token,
            });
        }

        if let (Ok(api_key), Ok(user_id), Ok(primary_key)) = (
            std::env::var("MTN_MOMO_API_KEY"),
            std::env::var("MTN_MOMO_USER_ID"),
            std::env::var("MTN_MOMO_PRIMARY_KEY"),
        ) {
            self.momo = Some(MomoConfig {
                api_key,
                user_id,
                primary_key,
                environment: std::env::var("MTN_MOMO_ENVIRONMENT")
                    .unwrap_or_else(|_| default_momo_environment()),
            });
        }

        if let Ok(token) = std::env::var("GREEN_API_WEBHOOK_TOKEN") {
            self.webhook.secret_token = token;
        }
        if let Ok(port) = std::env::var("WEBHOOK_PORT") {
            if let Ok(p) = port.parse() {
                self.webhook.port = p;
            }
        }
        if let Ok(path) = std::env::var("WEBHOOK_PATH") {
            if !path.is_empty() {
                self.webhook.path = path;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_provider_default() {
        assert_eq!(LlmProvider::default(), LlmProvider::OpenAi);
    }

    #[test]
    fn test_llm_provider_parse() {
        assert_eq!(LlmProvider::parse("claude"), LlmProvider::Claude);
        assert_eq!(LlmProvider::parse("Anthropic"), LlmProvider::Claude);
        assert_eq!(LlmProvider::parse("openai"), LlmProvider::OpenAi);
        assert_eq!(LlmProvider::parse("anything-else"), LlmProvider::OpenAi);
    }

    #[test]
    fn test_llm_config_default() {
        let config = LlmConfig::default();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.provider, LlmProvider::OpenAi);
        assert!(config.api_key.is_empty());
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_webhook_config_default() {
        let config = WebhookConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.path, "/webhook");
        assert!(config.secret_token.is_empty());
    }

    #[test]
    fn test_expand_env_vars() {
        std::env::set_var("SHOPBOT_TEST_VAR", "test_value");

        let result = Config::expand_env_vars("prefix_${SHOPBOT_TEST_VAR}_suffix");
        assert_eq!(result, "prefix_test_value_suffix");

        let result = Config::expand_env_vars("prefix_${SHOPBOT_NONEXISTENT}_suffix");
        assert_eq!(result, "prefix__suffix");

        std::env::remove_var("SHOPBOT_TEST_VAR");
    }

    #[test]
    fn test_expand_env_vars_no_braces() {
        assert_eq!(Config::expand_env_vars("no_vars_here"), "no_vars_here");
        assert_eq!(Config::expand_env_vars("plain $dollar"), "plain $dollar");
    }

    #[test]
    fn test_toml_config_parsing() {
        let toml_content = r#"
[llm]
provider = "openai"
model = "gpt-4o"
api_key = "test_key"

[whatsapp]
instance_id = "7105000001"
api_token = "green_token"

[momo]
api_key = "momo_key"
user_id = "momo_user"
primary_key = "momo_primary"

[webhook]
secret_token = "hook_secret"
port = 8080
"#;

        let config: Config = toml::from_str(toml_content).unwrap();

        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.llm.provider, LlmProvider::OpenAi);

        let whatsapp = config.whatsapp.unwrap();
        assert_eq!(whatsapp.instance_id, "7105000001");
        assert_eq!(whatsapp.api_token, "green_token");

        let momo = config.momo.unwrap();
        assert_eq!(momo.user_id, "momo_user");
        assert_eq!(momo.environment, "sandbox");

        assert_eq!(config.webhook.secret_token, "hook_secret");
        assert_eq!(config.webhook.port, 8080);
        assert_eq!(config.webhook.path, "/webhook");
    }
}
