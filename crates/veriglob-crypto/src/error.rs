//! # Cryptographic Error Types
//!
//! Structured errors for key handling and token operations in
//! `veriglob-crypto`.

use thiserror::Error;

/// Errors from cryptographic operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Key bytes have the wrong length or are internally inconsistent.
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),

    /// The token signature does not verify under the supplied public key.
    #[error("signature invalid: {0}")]
    SignatureInvalid(String),

    /// The token is not a well-formed v4.public token.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// Hex decoding error.
    #[error("hex decode error: {0}")]
    HexDecode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_key_material_display() {
        let err = CryptoError::InvalidKeyMaterial("expected 64 bytes, got 12".to_string());
        assert!(format!("{err}").contains("expected 64 bytes"));
    }

    #[test]
    fn signature_invalid_display() {
        let err = CryptoError::SignatureInvalid("bad sig".to_string());
        assert!(format!("{err}").contains("bad sig"));
    }

    #[test]
    fn malformed_token_display() {
        let err = CryptoError::MalformedToken("missing v4.public. prefix".to_string());
        let msg = format!("{err}");
        assert!(msg.starts_with("malformed token"));
        assert!(msg.contains("v4.public."));
    }

    #[test]
    fn hex_decode_display() {
        let err = CryptoError::HexDecode("invalid char".to_string());
        assert!(format!("{err}").contains("invalid char"));
    }
}
