//! In-memory gateway transport for development and tests
//!
//! Replies are scripted up front and served in order; every request is
//! recorded so callers can assert on what would have gone over the wire.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use super::transport::{GatewayReply, GatewayTransport};
use crate::InfrastructureError;

/// HTTP method of a recorded request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordedMethod {
    Get,
    PostForm,
    PostJson,
}

/// A request seen by the mock transport
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: RecordedMethod,
    pub url: String,
    pub params: Vec<(String, String)>,
    pub json: Option<Value>,
}

impl RecordedRequest {
    /// Value of a query or form parameter
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Scripted transport
#[derive(Debug, Default)]
pub struct MockGatewayTransport {
    replies: Mutex<VecDeque<Result<GatewayReply, String>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockGatewayTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply with the given status and body
    pub fn push_reply(&self, status: u16, body: impl Into<String>) -> &Self {
        self.queue(Ok(GatewayReply::new(status, body)));
        self
    }

    /// Queue a 200 reply
    pub fn push_ok(&self, body: impl Into<String>) -> &Self {
        self.push_reply(200, body)
    }

    /// Queue a transport failure (no response received)
    pub fn push_failure(&self, message: impl Into<String>) -> &Self {
        self.queue(Err(message.into()));
        self
    }

    /// All requests seen so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().ok().and_then(|r| r.last().cloned())
    }

    fn queue(&self, reply: Result<GatewayReply, String>) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(reply);
        }
    }

    fn serve(&self, request: RecordedRequest) -> Result<GatewayReply, InfrastructureError> {
        info!(
            method = ?request.method,
            url = %request.url,
            "Mock gateway request"
        );
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        let next = self
            .replies
            .lock()
            .map_err(|_| InfrastructureError::Transport("mock transport poisoned".to_string()))?
            .pop_front();

        match next {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(InfrastructureError::Transport(message)),
            None => Err(InfrastructureError::Transport(
                "no scripted reply".to_string(),
            )),
        }
    }
}

fn owned_params(params: &[(&str, &str)]) -> Vec<(String, String)> {
    params
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[async_trait]
impl GatewayTransport for MockGatewayTransport {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<GatewayReply, InfrastructureError> {
        self.serve(RecordedRequest {
            method: RecordedMethod::Get,
            url: url.to_string(),
            params: owned_params(query),
            json: None,
        })
    }

    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<GatewayReply, InfrastructureError> {
        self.serve(RecordedRequest {
            method: RecordedMethod::PostForm,
            url: url.to_string(),
            params: owned_params(form),
            json: None,
        })
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<GatewayReply, InfrastructureError> {
        self.serve(RecordedRequest {
            method: RecordedMethod::PostJson,
            url: url.to_string(),
            params: Vec::new(),
            json: Some(body.clone()),
        })
    }

    fn name(&self) -> &str {
        "mock"
    }
}
