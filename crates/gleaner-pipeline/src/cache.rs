//! Content-addressed reply cache
//!
//! Keys are SHA-256 digests of the exact messages sent, so an identical
//! re-upload reuses earlier replies. Inputs are immutable once uploaded,
//! so entries never need invalidating.

use gleaner_domain::ChatMessage;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Hex-encoded SHA-256 of a message sequence
pub type CacheKey = String;

/// Shared, thread-safe map from request digest to reply text
#[derive(Debug, Clone, Default)]
pub struct InsightCache {
    entries: Arc<Mutex<HashMap<CacheKey, String>>>,
}

impl InsightCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Digest of the roles and contents of `messages`
    pub fn key_for(messages: &[ChatMessage]) -> CacheKey {
        let mut hasher = Sha256::new();
        for message in messages {
            hasher.update(message.role.as_str().as_bytes());
            hasher.update([0u8]);
            hasher.update(message.content.as_bytes());
            hasher.update([0u8]);
        }
        hasher
            .finalize()
            .iter()
            .map(|byte| format!("{:02x}", byte))
            .collect()
    }

    /// Cached reply for `key`
    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    /// Store a reply
    pub fn insert(&self, key: CacheKey, reply: impl Into<String>) {
        self.lock().insert(key, reply.into());
    }

    /// Number of cached replies
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True when nothing has been cached
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_stable_and_content_sensitive() {
        let a = [ChatMessage::system("s"), ChatMessage::user("hello")];
        let b = [ChatMessage::system("s"), ChatMessage::user("hello")];
        let c = [ChatMessage::system("s"), ChatMessage::user("hello!")];

        assert_eq!(InsightCache::key_for(&a), InsightCache::key_for(&b));
        assert_ne!(InsightCache::key_for(&a), InsightCache::key_for(&c));
        assert_eq!(InsightCache::key_for(&a).len(), 64);
    }

    #[test]
    fn test_role_is_part_of_key() {
        let as_user = [ChatMessage::user("x")];
        let as_system = [ChatMessage::system("x")];
        assert_ne!(InsightCache::key_for(&as_user), InsightCache::key_for(&as_system));
    }

    #[test]
    fn test_clones_share_entries() {
        let cache = InsightCache::new();
        let other = cache.clone();
        cache.insert("k".to_string(), "v");

        assert_eq!(other.get("k"), Some("v".to_string()));
        assert_eq!(other.len(), 1);
    }
}
