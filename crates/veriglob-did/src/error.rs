//! Errors from parsing `did:key` identifiers.

use thiserror::Error;

/// An identifier could not be resolved to an Ed25519 public key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DidError {
    /// Not of the form `did:<method>:<method-id>`, or the method-specific id
    /// is not a `z`-prefixed base58btc string.
    #[error("malformed identifier {did:?}: {reason}")]
    MalformedIdentifier {
        /// The identifier as supplied.
        did: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A well-formed DID using a method other than `key`.
    #[error("unsupported DID method {0:?}: only \"key\" is supported")]
    UnsupportedMethod(String),

    /// The decoded bytes do not start with the Ed25519 multicodec tag `0xed01`.
    #[error("invalid multicodec type tag: expected ed01, got {0}")]
    InvalidTypeTag(String),

    /// The key following the type tag is not 32 bytes.
    #[error("invalid public key length: expected 32 bytes, got {0}")]
    InvalidKeyLength(usize),
}

impl DidError {
    pub(crate) fn malformed(did: &str, reason: impl Into<String>) -> Self {
        Self::MalformedIdentifier {
            did: did.to_string(),
            reason: reason.into(),
        }
    }
}
