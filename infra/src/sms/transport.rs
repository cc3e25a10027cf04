//! HTTP transport used by the gateway client

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::InfrastructureError;

/// Status and raw body of a gateway response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayReply {
    pub status: u16,
    pub body: String,
}

impl GatewayReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport for gateway requests
///
/// Implementations return `Err` only when no response was received at all;
/// any HTTP status, including errors, comes back as a [`GatewayReply`].
#[async_trait]
pub trait GatewayTransport: Send + Sync {
    /// GET with query parameters
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<GatewayReply, InfrastructureError>;

    /// POST with a form-encoded body
    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<GatewayReply, InfrastructureError>;

    /// POST with a JSON body
    async fn post_json(&self, url: &str, body: &Value) -> Result<GatewayReply, InfrastructureError>;

    /// Transport name for logging
    fn name(&self) -> &str;
}

/// Transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("bp_infra/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Wrap an already configured client (proxies, timeouts, TLS roots)
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn into_reply(response: reqwest::Response) -> Result<GatewayReply, InfrastructureError> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, body_length = body.len(), "Gateway responded");
        Ok(GatewayReply { status, body })
    }
}

#[async_trait]
impl GatewayTransport for ReqwestTransport {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<GatewayReply, InfrastructureError> {
        let response = self.client.get(url).query(query).send().await?;
        Self::into_reply(response).await
    }

    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<GatewayReply, InfrastructureError> {
        let response = self.client.post(url).form(form).send().await?;
        Self::into_reply(response).await
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<GatewayReply, InfrastructureError> {
        let response = self.client.post(url).json(body).send().await?;
        Self::into_reply(response).await
    }

    fn name(&self) -> &str {
        "reqwest"
    }
}
