//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and infrastructure.
//! Implementations live in other crates (`gleaner-llm`, `gleaner-extract`).

use crate::{ChatMessage, Credential};

/// A synchronous chat/completion-style text service
///
/// Implemented by the infrastructure layer (gleaner-llm)
pub trait TextService {
    /// Error type for service calls
    type Error;

    /// Send role-tagged messages and block until one completion arrives
    ///
    /// Implementations must bound the call with a timeout.
    fn complete(&self, messages: &[ChatMessage], credential: &Credential)
        -> Result<String, Self::Error>;
}

/// Turns raw file bytes into plain text
///
/// Implemented by the infrastructure layer (gleaner-extract)
pub trait TextExtractor {
    /// Error type for extraction
    type Error;

    /// Extract text; the declared mime type selects the format reader
    fn extract(&self, bytes: &[u8], mime: &str) -> Result<String, Self::Error>;
}
