//! InsightClient - size-guarded adapter around the text service

use crate::cache::InsightCache;
use gleaner_domain::traits::TextService;
use gleaner_domain::{ChatMessage, Credential, Role};
use gleaner_llm::ServiceError;
use tracing::{debug, warn};

/// A payload that exceeded the per-call ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncation {
    /// Length before truncation (characters)
    pub original_chars: usize,
    /// Length actually sent (characters)
    pub truncated_chars: usize,
}

/// One successful call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Completion text as returned by the service
    pub text: String,
    /// Set when user content was cut to fit the ceiling
    pub truncation: Option<Truncation>,
    /// True when the reply came from the cache
    pub cached: bool,
}

/// Cut `payload` to at most `ceiling` characters
///
/// Returns the payload unchanged (and `None`) when it already fits, so
/// applying the cut twice never alters the result further.
///
/// # Examples
///
/// ```
/// use gleaner_pipeline::client::truncate_payload;
///
/// let (text, truncation) = truncate_payload("abcdef", 4);
/// assert_eq!(text, "abcd");
/// assert_eq!(truncation.unwrap().original_chars, 6);
/// ```
pub fn truncate_payload(payload: &str, ceiling: usize) -> (&str, Option<Truncation>) {
    match payload.char_indices().nth(ceiling) {
        Some((cut, _)) => (
            &payload[..cut],
            Some(Truncation {
                original_chars: payload.chars().count(),
                truncated_chars: ceiling,
            }),
        ),
        None => (payload, None),
    }
}

/// Synchronous, non-retrying client for the text service
///
/// Every `user` message is truncated to `max_payload_chars` before dispatch.
/// A truncation is logged as a warning and returned with the reply. Failures
/// are reported upward immediately.
#[derive(Debug, Clone)]
pub struct InsightClient<S> {
    service: S,
    max_payload_chars: usize,
    cache: Option<InsightCache>,
}

impl<S> InsightClient<S>
where
    S: TextService<Error = ServiceError>,
{
    /// Create a client without a cache
    pub fn new(service: S, max_payload_chars: usize) -> Self {
        Self {
            service,
            max_payload_chars,
            cache: None,
        }
    }

    /// Reuse replies for identical requests
    pub fn with_cache(mut self, cache: InsightCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// The wrapped service
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Per-call ceiling for user content (characters)
    pub fn max_payload_chars(&self) -> usize {
        self.max_payload_chars
    }

    /// The reply cache, if enabled
    pub fn cache(&self) -> Option<&InsightCache> {
        self.cache.as_ref()
    }

    /// Send `messages` and wait for one completion
    pub fn request(
        &self,
        messages: &[ChatMessage],
        credential: &Credential,
    ) -> Result<Reply, ServiceError> {
        let mut truncation = None;
        let mut outgoing: Vec<ChatMessage> = Vec::with_capacity(messages.len());

        for message in messages {
            if message.role != Role::User {
                outgoing.push(message.clone());
                continue;
            }
            let (content, cut) = truncate_payload(&message.content, self.max_payload_chars);
            if let Some(cut) = cut {
                warn!(
                    original_chars = cut.original_chars,
                    truncated_chars = cut.truncated_chars,
                    "Payload exceeds ceiling, truncating"
                );
                truncation.get_or_insert(cut);
            }
            outgoing.push(ChatMessage::user(content));
        }

        let key = self.cache.as_ref().map(|_| InsightCache::key_for(&outgoing));
        if let (Some(cache), Some(key)) = (&self.cache, &key) {
            if let Some(text) = cache.get(key) {
                debug!("Reply served from cache");
                return Ok(Reply {
                    text,
                    truncation,
                    cached: true,
                });
            }
        }

        let text = self.service.complete(&outgoing, credential)?;

        if let (Some(cache), Some(key)) = (&self.cache, key) {
            cache.insert(key, text.clone());
        }

        Ok(Reply {
            text,
            truncation,
            cached: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gleaner_llm::MockProvider;

    fn key() -> Credential {
        Credential::new("test-key")
    }

    #[test]
    fn test_truncation_to_exact_ceiling() {
        let payload = "a".repeat(5000);
        let (text, truncation) = truncate_payload(&payload, 4000);

        assert_eq!(text.len(), 4000);
        assert_eq!(text, &payload[..4000]);
        assert_eq!(
            truncation,
            Some(Truncation {
                original_chars: 5000,
                truncated_chars: 4000
            })
        );
    }

    #[test]
    fn test_truncation_is_idempotent() {
        let payload = "b".repeat(5000);
        let (once, _) = truncate_payload(&payload, 4000);
        let (twice, truncation) = truncate_payload(once, 4000);

        assert_eq!(twice, once);
        assert!(truncation.is_none());
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let (text, truncation) = truncate_payload("ééééé", 3);
        assert_eq!(text, "ééé");
        assert_eq!(truncation.unwrap().original_chars, 5);
    }

    #[test]
    fn test_request_truncates_user_content_only() {
        let provider = MockProvider::echo();
        let client = InsightClient::new(provider.clone(), 5);
        let messages = [
            ChatMessage::system("a long system framing"),
            ChatMessage::user("0123456789"),
        ];

        let reply = client.request(&messages, &key()).unwrap();
        assert_eq!(reply.text, "01234");
        assert_eq!(reply.truncation.unwrap().original_chars, 10);

        let sent = &provider.calls()[0];
        assert_eq!(sent[0].content, "a long system framing");
        assert_eq!(sent[1].content, "01234");
    }

    #[test]
    fn test_request_within_ceiling_is_untouched() {
        let provider = MockProvider::echo();
        let client = InsightClient::new(provider, 100);

        let reply = client.request(&[ChatMessage::user("short")], &key()).unwrap();
        assert_eq!(reply.text, "short");
        assert!(reply.truncation.is_none());
        assert!(!reply.cached);
    }

    #[test]
    fn test_service_error_is_surfaced() {
        let mut provider = MockProvider::default();
        provider.add_error("boom", ServiceError::RateLimited);
        let client = InsightClient::new(provider.clone(), 100);

        let result = client.request(&[ChatMessage::user("boom")], &key());
        assert_eq!(result, Err(ServiceError::RateLimited));
        assert_eq!(provider.call_count(), 1);
    }

    #[test]
    fn test_cache_reuses_identical_requests() {
        let provider = MockProvider::new("insight");
        let client = InsightClient::new(provider.clone(), 100).with_cache(InsightCache::new());
        let messages = [ChatMessage::user("same text")];

        let first = client.request(&messages, &key()).unwrap();
        let second = client.request(&messages, &key()).unwrap();

        assert!(!first.cached);
        assert!(second.cached);
        assert_eq!(second.text, "insight");
        assert_eq!(provider.call_count(), 1);
    }

    #[test]
    fn test_failures_are_not_cached() {
        let mut provider = MockProvider::default();
        provider.add_error("flaky", ServiceError::Timeout);
        let cache = InsightCache::new();
        let client = InsightClient::new(provider.clone(), 100).with_cache(cache.clone());

        assert!(client.request(&[ChatMessage::user("flaky")], &key()).is_err());
        assert!(client.request(&[ChatMessage::user("flaky")], &key()).is_err());
        assert!(cache.is_empty());
        assert_eq!(provider.call_count(), 2);
    }
}
