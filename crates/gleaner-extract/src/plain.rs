//! Plain text reader

use crate::error::ExtractError;

/// Decode bytes as UTF-8; invalid sequences are an error, not replaced
pub(crate) fn extract(bytes: &[u8]) -> Result<String, ExtractError> {
    // A leading byte-order mark is not part of the text
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    String::from_utf8(bytes.to_vec())
        .map_err(|e| ExtractError::Malformed(format!("Invalid UTF-8: {}", e)))
}
