//! Completion worker client
//!
//! Implements the CompletionClient trait for a chat-completions proxy. The
//! worker attaches provider credentials server-side, so no Authorization
//! header is sent from here. There is no retry: every failure is final for
//! that request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::types::WorkerResponse;
use super::{CompletionClient, CompletionRequest, CompletionResponse, RequestError};
use crate::config::WorkerConfig;

/// HTTP client for the completion worker endpoint
pub struct WorkerClient {
    url: String,
    http: Client,
    timeout: Option<Duration>,
}

impl WorkerClient {
    /// Create a new client from worker configuration
    pub fn from_config(config: &WorkerConfig) -> Result<Self, RequestError> {
        debug!(?config, "from_config: called");
        let timeout = config.timeout_ms.map(Duration::from_millis);

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(RequestError::Network)?;

        Ok(Self {
            url: config.url.clone(),
            http,
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Parse a worker response body into the first choice's reply text
    fn parse_response(body: &str) -> Result<CompletionResponse, RequestError> {
        let parsed: WorkerResponse = serde_json::from_str(body)?;
        debug!(choices = parsed.choices.len(), "parse_response: called");

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(RequestError::EmptyReply)?;

        Ok(CompletionResponse { content })
    }

    fn map_send_error(&self, err: reqwest::Error) -> RequestError {
        match self.timeout {
            Some(timeout) if err.is_timeout() => RequestError::Timeout(timeout),
            _ => RequestError::Network(err),
        }
    }
}

#[async_trait]
impl CompletionClient for WorkerClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, RequestError> {
        debug!(url = %self.url, model = %request.model, messages = request.messages.len(), "complete: called");

        let response = self
            .http
            .post(&self.url)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            debug!(%status, "complete: worker error");
            return Err(RequestError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await.map_err(|e| self.map_send_error(e))?;
        debug!(body_len = body.len(), "complete: success");
        Self::parse_response(&body)
    }
}
