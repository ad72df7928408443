//! Gleaner Text Service Layer
//!
//! Implementations of the `TextService` trait from `gleaner-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic, scriptable mock for testing
//! - `OpenAiProvider`: Blocking client for an OpenAI-compatible chat-completions API
//!
//! Every failure surfaces as a [`ServiceError`]. Providers never retry; a
//! single failure is reported to the caller immediately.
//!
//! # Examples
//!
//! ```
//! use gleaner_llm::MockProvider;
//! use gleaner_domain::traits::TextService;
//! use gleaner_domain::{ChatMessage, Credential};
//!
//! let provider = MockProvider::new("Hello from the model!");
//! let messages = [ChatMessage::user("hi")];
//! let reply = provider.complete(&messages, &Credential::new("key")).unwrap();
//! assert_eq!(reply, "Hello from the model!");
//! ```

#![warn(missing_docs)]

pub mod openai;

use gleaner_domain::traits::TextService;
use gleaner_domain::{ChatMessage, Credential, Role};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

pub use openai::OpenAiProvider;

/// Failures surfaced by a call to the text service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Network or connection failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// The call did not finish within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Credential missing, invalid or not permitted
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Payload still too large for the service after truncation
    #[error("Payload too large: {0}")]
    Oversize(String),

    /// Any other non-success status from the service
    #[error("Service error (HTTP {status}): {message}")]
    Service {
        /// HTTP status code
        status: u16,
        /// Error detail returned by the service
        message: String,
    },

    /// Response body could not be understood
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone)]
enum Scripted {
    Reply(String),
    Fail(ServiceError),
}

/// Mock text service for deterministic testing
///
/// Replies are chosen by matching substrings of the user content against
/// scripted rules in insertion order; the first match wins. Without a match
/// the provider returns its default reply, or echoes the user content when
/// built with [`MockProvider::echo`]. Every call is recorded.
///
/// # Examples
///
/// ```
/// use gleaner_llm::{MockProvider, ServiceError};
/// use gleaner_domain::traits::TextService;
/// use gleaner_domain::{ChatMessage, Credential};
///
/// let mut provider = MockProvider::default();
/// provider.add_response("alpha", "first");
/// provider.add_error("beta", ServiceError::RateLimited);
///
/// let key = Credential::new("key");
/// assert_eq!(provider.complete(&[ChatMessage::user("alpha")], &key).unwrap(), "first");
/// assert!(provider.complete(&[ChatMessage::user("beta")], &key).is_err());
/// assert_eq!(provider.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    echo: bool,
    rules: Arc<Mutex<Vec<(String, Scripted)>>>,
    calls: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
}

impl MockProvider {
    /// Create a MockProvider with a fixed reply for all requests
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            echo: false,
            rules: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a MockProvider that replies with the user content it received
    pub fn echo() -> Self {
        Self {
            echo: true,
            ..Self::new("")
        }
    }

    /// Reply with `response` whenever the user content contains `needle`
    pub fn add_response(&mut self, needle: impl Into<String>, response: impl Into<String>) {
        lock(&self.rules).push((needle.into(), Scripted::Reply(response.into())));
    }

    /// Fail with `error` whenever the user content contains `needle`
    pub fn add_error(&mut self, needle: impl Into<String>, error: ServiceError) {
        lock(&self.rules).push((needle.into(), Scripted::Fail(error)));
    }

    /// Number of calls made so far
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Messages of every call, in call order
    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        lock(&self.calls).clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl TextService for MockProvider {
    type Error = ServiceError;

    fn complete(
        &self,
        messages: &[ChatMessage],
        credential: &Credential,
    ) -> Result<String, Self::Error> {
        lock(&self.calls).push(messages.to_vec());

        if credential.is_blank() {
            return Err(ServiceError::Auth("no credential supplied".to_string()));
        }

        let user_content = user_content(messages);

        let rules = lock(&self.rules);
        if let Some((_, scripted)) = rules
            .iter()
            .find(|(needle, _)| user_content.contains(needle.as_str()))
        {
            return match scripted {
                Scripted::Reply(response) => Ok(response.clone()),
                Scripted::Fail(error) => Err(error.clone()),
            };
        }

        if self.echo {
            Ok(user_content)
        } else {
            Ok(self.default_response.clone())
        }
    }
}

/// All user message content of a request, joined by newlines
fn user_content(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .filter(|m| m.role == Role::User)
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A panicking test thread must not poison the mock for the others
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
