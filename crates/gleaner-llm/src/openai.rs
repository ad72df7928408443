//! OpenAI-compatible chat-completions provider
//!
//! Sends role-tagged messages to `{endpoint}/chat/completions` and returns the
//! first choice's message content.
//!
//! # Features
//!
//! - Blocking HTTP (the pipeline is synchronous by contract)
//! - Mandatory request timeout; an elapsed timeout is a [`ServiceError::Timeout`]
//! - Status codes mapped onto the [`ServiceError`] taxonomy
//! - No retries: one failure is reported upward immediately
//!
//! # Examples
//!
//! ```no_run
//! use gleaner_llm::OpenAiProvider;
//! use std::time::Duration;
//!
//! let provider = OpenAiProvider::new(
//!     "https://api.openai.com/v1",
//!     "gpt-4o-mini",
//!     Duration::from_secs(60),
//! ).unwrap();
//! ```

use crate::ServiceError;
use gleaner_domain::traits::TextService;
use gleaner_domain::{ChatMessage, Credential};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default chat model
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Blocking client for an OpenAI-compatible chat-completions API
pub struct OpenAiProvider {
    endpoint: String,
    model: String,
    timeout: Duration,
    temperature: Option<f32>,
    client: reqwest::blocking::Client,
}

/// Request body for the chat-completions API
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Response from the chat-completions API
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Error envelope returned with non-success statuses
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: Option<String>,
}

impl OpenAiProvider {
    /// Create a provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: API base URL (e.g., "https://api.openai.com/v1")
    /// - `model`: Chat model name (e.g., "gpt-4o-mini")
    /// - `timeout`: Upper bound for one request, connection included
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Transport`] if the HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            timeout,
            temperature: None,
            client,
        })
    }

    /// Set the sampling temperature sent with every request
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Model name requests are sent with
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Configured request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn request_body<'a>(&'a self, messages: &'a [ChatMessage]) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: self.temperature,
        }
    }
}

impl TextService for OpenAiProvider {
    type Error = ServiceError;

    fn complete(
        &self,
        messages: &[ChatMessage],
        credential: &Credential,
    ) -> Result<String, Self::Error> {
        if credential.is_blank() {
            return Err(ServiceError::Auth("no credential supplied".to_string()));
        }

        let url = format!("{}/chat/completions", self.endpoint);
        let body = self.request_body(messages);

        debug!(model = %self.model, messages = messages.len(), "Sending completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(credential.expose())
            .json(&body)
            .send()
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(map_status(status, &text));
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| ServiceError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        parse_completion(parsed)
    }
}

fn parse_completion(response: ChatResponse) -> Result<String, ServiceError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| ServiceError::InvalidResponse("Response contained no completion".to_string()))
}

fn map_transport_error(e: reqwest::Error) -> ServiceError {
    if e.is_timeout() {
        ServiceError::Timeout
    } else {
        ServiceError::Transport(format!("Request failed: {}", e))
    }
}

/// Map a non-success HTTP status and body onto the error taxonomy
fn map_status(status: StatusCode, body: &str) -> ServiceError {
    let (message, code) = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => (envelope.error.message, envelope.error.code),
        Err(_) => (body.to_string(), None),
    };

    let context_exceeded = code.as_deref() == Some("context_length_exceeded")
        || message.contains("maximum context length");

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ServiceError::Auth(message),
        StatusCode::TOO_MANY_REQUESTS => ServiceError::RateLimited,
        StatusCode::PAYLOAD_TOO_LARGE => ServiceError::Oversize(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ServiceError::Timeout,
        _ if context_exceeded => ServiceError::Oversize(message),
        _ => ServiceError::Service {
            status: status.as_u16(),
            message,
        },
    }
}
