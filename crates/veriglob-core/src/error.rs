//! # Validation Errors
//!
//! Errors raised while constructing the core value types from untrusted
//! strings (timestamps read from tokens or registry files, identifiers
//! supplied by callers).

use thiserror::Error;

/// A value failed validation at construction time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The string is not an acceptable RFC 3339 timestamp.
    #[error("invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A timestamp computation left the representable range.
    #[error("timestamp out of range: {0}")]
    TimestampOutOfRange(String),

    /// The string is not an acceptable credential identifier.
    #[error("invalid credential id {0:?}: must be non-empty and contain no whitespace")]
    InvalidCredentialId(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_timestamp_display_includes_value_and_reason() {
        let err = ValidationError::InvalidTimestamp {
            value: "yesterday".to_string(),
            reason: "not RFC 3339".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("yesterday"));
        assert!(msg.contains("not RFC 3339"));
    }

    #[test]
    fn invalid_credential_id_display() {
        let err = ValidationError::InvalidCredentialId(" ".to_string());
        assert!(err.to_string().contains("whitespace"));
    }
}
