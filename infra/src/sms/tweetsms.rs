//! TweetSMS gateway client
//!
//! `send` and `check_balance` never return transport errors to the caller:
//! every outcome is folded into [`SmsFailure`]. The two pass-through lookups
//! (`get_message_details`, `get_archive`) apply no decoding and propagate
//! [`InfrastructureError`] as-is.

use std::sync::Arc;

use bp_shared::config::SmsGatewayConfig;
use bp_shared::phone::{mask_phone_number, validate_recipient};
use bp_shared::validation::{validate_message, validate_sender};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::response::{
    decode_balance_body, decode_send_body, PassThroughBody, SendReceipt, SmsFailure,
};
use super::transport::{GatewayReply, GatewayTransport, ReqwestTransport};
use crate::InfrastructureError;

/// An outgoing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsRequest {
    pub recipient: String,
    pub message: String,
    /// Display name; the configured default sender when `None`
    #[serde(default)]
    pub sender: Option<String>,
}

impl SmsRequest {
    pub fn new(recipient: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            message: message.into(),
            sender: None,
        }
    }

    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }
}

/// Client for the TweetSMS HTTP API
pub struct TweetSmsClient {
    config: SmsGatewayConfig,
    transport: Arc<dyn GatewayTransport>,
}

impl TweetSmsClient {
    /// Create a client that talks to the gateway over HTTP
    pub fn new(config: SmsGatewayConfig) -> Result<Self, InfrastructureError> {
        let transport = ReqwestTransport::new()?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client over an explicit transport
    pub fn with_transport(
        config: SmsGatewayConfig,
        transport: Arc<dyn GatewayTransport>,
    ) -> Result<Self, InfrastructureError> {
        config.validate().map_err(InfrastructureError::Config)?;
        info!(
            transport = transport.name(),
            sender = %config.default_sender,
            "TweetSMS client initialized"
        );
        Ok(Self { config, transport })
    }

    /// Create from `TWEETSMS_*` environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(SmsGatewayConfig::from_env())
    }

    pub fn config(&self) -> &SmsGatewayConfig {
        &self.config
    }

    /// Validate and send one message
    ///
    /// Validators run in order recipient, sender, message and the first
    /// failure is returned without contacting the gateway.
    pub async fn send(&self, request: &SmsRequest) -> Result<SendReceipt, SmsFailure> {
        let sender = request
            .sender
            .as_deref()
            .unwrap_or(&self.config.default_sender);

        let recipient = validate_recipient(&request.recipient)?;
        validate_sender(sender)?;
        let segments = validate_message(&request.message)?;

        let masked = mask_phone_number(&recipient);
        debug!(
            to = %masked,
            parts = segments.parts,
            arabic = segments.contains_arabic,
            "Sending SMS"
        );

        let query = [
            ("comm", "sendsms"),
            ("api_key", self.config.api_key.as_str()),
            ("to", recipient.as_str()),
            ("message", request.message.as_str()),
            ("sender", sender),
        ];
        let reply = self.call(&query, "sendsms").await?;

        match decode_send_body(&reply.body) {
            Ok((sms_id, mobile)) => {
                info!(
                    event = "sms_sent",
                    to = %masked,
                    sms_id = %sms_id,
                    parts = segments.parts,
                    "SMS accepted by gateway"
                );
                Ok(SendReceipt {
                    sms_id,
                    mobile,
                    parts: segments.parts,
                })
            }
            Err(failure) => {
                warn!(
                    event = "sms_rejected",
                    to = %masked,
                    code = %failure.code,
                    "Gateway rejected SMS"
                );
                Err(failure)
            }
        }
    }

    /// Send with the configured default sender
    pub async fn send_text(&self, recipient: &str, message: &str) -> Result<SendReceipt, SmsFailure> {
        self.send(&SmsRequest::new(recipient, message)).await
    }

    /// Current account balance
    pub async fn check_balance(&self) -> Result<f64, SmsFailure> {
        let query = [
            ("comm", "chk_balance"),
            ("api_key", self.config.api_key.as_str()),
        ];
        let reply = self.call(&query, "chk_balance").await?;

        let balance = decode_balance_body(&reply.body);
        match &balance {
            Ok(amount) => info!(event = "sms_balance", balance = amount, "Balance checked"),
            Err(failure) => warn!(
                event = "sms_balance_failed",
                code = %failure.code,
                "Balance check failed"
            ),
        }
        balance
    }

    /// Message detail lookup (form-encoded POST)
    ///
    /// The API key is added unless `params` already carries one.
    pub async fn get_message_details(
        &self,
        params: &[(&str, &str)],
    ) -> Result<PassThroughBody, InfrastructureError> {
        let mut form: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 1);
        if !params.iter().any(|(key, _)| *key == "api_key") {
            form.push(("api_key", self.config.api_key.as_str()));
        }
        form.extend_from_slice(params);

        let reply = self
            .transport
            .post_form(&self.config.details_url, &form)
            .await?;
        Ok(pass_through(reply, "details"))
    }

    /// Archive query (JSON POST)
    ///
    /// When `query` is an object without an `api_key` field, one is added.
    pub async fn get_archive(&self, query: &Value) -> Result<PassThroughBody, InfrastructureError> {
        let mut body = query.clone();
        if let Value::Object(map) = &mut body {
            map.entry("api_key")
                .or_insert_with(|| Value::String(self.config.api_key.clone()));
        }

        let reply = self
            .transport
            .post_json(&self.config.archive_url, &body)
            .await?;
        Ok(pass_through(reply, "archive"))
    }

    async fn call(&self, query: &[(&str, &str)], command: &str) -> Result<GatewayReply, SmsFailure> {
        match self.transport.get(&self.config.base_url, query).await {
            Ok(reply) if reply.is_success() => Ok(reply),
            Ok(reply) => {
                error!(
                    event = "sms_gateway_http_error",
                    command,
                    status = reply.status,
                    "Gateway returned an error status"
                );
                Err(SmsFailure::connection_failed())
            }
            Err(e) => {
                error!(
                    event = "sms_gateway_unreachable",
                    command,
                    error = %e,
                    "Gateway request failed"
                );
                Err(SmsFailure::transport(e.to_string()))
            }
        }
    }
}

fn pass_through(reply: GatewayReply, endpoint: &str) -> PassThroughBody {
    if !reply.is_success() {
        warn!(
            endpoint,
            status = reply.status,
            "Gateway lookup returned an error status"
        );
    }
    PassThroughBody::from_body(reply.body)
}
