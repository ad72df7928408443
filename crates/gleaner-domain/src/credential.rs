//! Credentials for the external text service

use std::fmt;

/// Opaque secret authorizing calls to the text service
///
/// The value is configuration threaded into every call site, never ambient
/// state. `Debug` and `Display` redact it so it cannot leak into logs.
///
/// # Examples
///
/// ```
/// use gleaner_domain::Credential;
///
/// let credential = Credential::new("sk-secret");
/// assert_eq!(credential.expose(), "sk-secret");
/// assert!(!format!("{:?}", credential).contains("secret"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a secret value
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Access the raw secret (only for building the outgoing request)
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// True when no usable secret was supplied
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}
