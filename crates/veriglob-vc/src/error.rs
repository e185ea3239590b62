//! Errors from credential and presentation operations.

use thiserror::Error;
use veriglob_core::{Timestamp, ValidationError};
use veriglob_crypto::CryptoError;

/// Errors from issuing or verifying credential and presentation tokens.
#[derive(Error, Debug)]
pub enum VcError {
    /// The signing or verification key is unusable.
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),

    /// The token signature does not verify under the supplied key.
    #[error("signature invalid: {0}")]
    SignatureInvalid(String),

    /// The token is not a v4.public token, or its claims are missing or
    /// mistyped.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// The credential type list names no supported subject type.
    #[error("unknown credential type: {0}")]
    UnknownCredentialType(String),

    /// Subject claims do not match the shape of their credential type.
    #[error("invalid credential subject: {0}")]
    InvalidSubject(String),

    /// The credential's `exp` claim is in the past.
    #[error("credential expired at {expired_at}")]
    CredentialExpired {
        /// The `exp` claim of the rejected credential.
        expired_at: Timestamp,
    },

    /// A presentation must embed at least one credential.
    #[error("a presentation requires at least one credential")]
    EmptyCredentialSet,

    /// The presentation was issued for a different verifier.
    #[error("audience mismatch: expected {expected:?}, token has {actual:?}")]
    AudienceMismatch {
        /// The audience the verifier expected.
        expected: String,
        /// The audience claimed by the token.
        actual: String,
    },

    /// The presentation answers a different challenge.
    #[error("nonce mismatch")]
    NonceMismatch,

    /// The presentation's `exp` claim is in the past.
    #[error("presentation expired at {expired_at}")]
    PresentationExpired {
        /// The `exp` claim of the rejected presentation.
        expired_at: Timestamp,
    },

    /// The credential id to embed is empty or contains whitespace.
    #[error("{0}")]
    InvalidCredentialId(ValidationError),

    /// Claim serialization failed during issuance.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A validity window could not be computed.
    #[error("timestamp error: {0}")]
    Timestamp(#[from] ValidationError),
}

impl From<CryptoError> for VcError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::InvalidKeyMaterial(msg) | CryptoError::HexDecode(msg) => {
                Self::InvalidKeyMaterial(msg)
            }
            CryptoError::SignatureInvalid(msg) => Self::SignatureInvalid(msg),
            CryptoError::MalformedToken(msg) => Self::MalformedToken(msg),
        }
    }
}
