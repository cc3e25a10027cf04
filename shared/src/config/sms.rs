//! SMS gateway configuration module

use serde::{Deserialize, Serialize};

use crate::utils::validation::validate_sender;

/// TweetSMS gateway configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsGatewayConfig {
    /// Endpoint serving `sendsms` and `chk_balance`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Shared secret sent as the `api_key` query parameter
    #[serde(default)]
    pub api_key: String,

    /// Sender display name used when a request does not set one
    #[serde(default = "default_sender")]
    pub default_sender: String,

    /// Endpoint for message detail lookups (form-encoded POST)
    #[serde(default = "default_details_url")]
    pub details_url: String,

    /// Endpoint for archive queries (JSON POST)
    #[serde(default = "default_archive_url")]
    pub archive_url: String,
}

impl Default for SmsGatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            default_sender: default_sender(),
            details_url: default_details_url(),
            archive_url: default_archive_url(),
        }
    }
}

impl SmsGatewayConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("TWEETSMS_BASE_URL").unwrap_or(defaults.base_url),
            api_key: std::env::var("TWEETSMS_API_KEY").unwrap_or_default(),
            default_sender: std::env::var("TWEETSMS_SENDER").unwrap_or(defaults.default_sender),
            details_url: std::env::var("TWEETSMS_DETAILS_URL").unwrap_or(defaults.details_url),
            archive_url: std::env::var("TWEETSMS_ARCHIVE_URL").unwrap_or(defaults.archive_url),
        }
    }

    /// Create a configuration with an API key and default endpoints
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Use a different endpoint for `sendsms` and `chk_balance`
    ///
    /// `details_url` and `archive_url` are left unchanged.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Check that the configuration can be used to talk to the gateway
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.trim().is_empty() {
            return Err("TWEETSMS_API_KEY is not set".to_string());
        }
        if self.base_url.trim().is_empty() {
            return Err("TWEETSMS_BASE_URL is empty".to_string());
        }
        validate_sender(&self.default_sender)
            .map_err(|e| format!("Invalid default sender: {}", e))
    }
}

fn default_base_url() -> String {
    String::from("https://tweetsms.ps/api.php")
}

fn default_sender() -> String {
    String::from("Beneficiary")
}

fn default_details_url() -> String {
    String::from("https://tweetsms.ps/api.php/details")
}

fn default_archive_url() -> String {
    String::from("https://tweetsms.ps/api.php/archive")
}
