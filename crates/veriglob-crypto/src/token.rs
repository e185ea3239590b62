//! # v4.public Signed Tokens
//!
//! Thin wrapper over `pasetors` for the one token mode Veriglob uses:
//! version 4, public purpose. The token is `v4.public.<b64url(payload‖sig)>`
//! where `sig` is an Ed25519 signature over the pre-authentication encoding
//! of header and payload. The payload is readable by anyone; only its
//! integrity is protected.
//!
//! No footer and no implicit assertion are used.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use pasetors::keys::{AsymmetricPublicKey, AsymmetricSecretKey};
use pasetors::token::UntrustedToken;
use pasetors::version4::{PublicToken, V4};
use pasetors::Public;

use crate::ed25519::{Ed25519KeyPair, Ed25519PublicKey};
use crate::error::CryptoError;

/// Header of every token this module produces or accepts.
pub const TOKEN_HEADER: &str = "v4.public.";

const SIGNATURE_LENGTH: usize = 64;

/// Sign `payload` with `keypair`, producing a `v4.public.` token.
pub fn sign_public(keypair: &Ed25519KeyPair, payload: &[u8]) -> Result<String, CryptoError> {
    let keypair_bytes = keypair.to_keypair_bytes();
    let secret = AsymmetricSecretKey::<V4>::from(keypair_bytes.as_slice())
        .map_err(|e| CryptoError::InvalidKeyMaterial(format!("{e:?}")))?;
    let token = PublicToken::sign(&secret, payload, None, None)
        .map_err(|e| CryptoError::InvalidKeyMaterial(format!("signing failed: {e:?}")))?;
    tracing::debug!(payload_len = payload.len(), "signed v4.public token");
    Ok(token)
}

/// Verify `token` against `public_key` and return the authenticated payload.
///
/// A string that does not parse as a v4.public token fails with
/// [`CryptoError::MalformedToken`]; a well-formed token whose signature does
/// not verify fails with [`CryptoError::SignatureInvalid`].
pub fn verify_public(token: &str, public_key: &Ed25519PublicKey) -> Result<Vec<u8>, CryptoError> {
    let untrusted = UntrustedToken::<Public, V4>::try_from(token)
        .map_err(|e| CryptoError::MalformedToken(format!("{e:?}")))?;
    let pk = AsymmetricPublicKey::<V4>::from(public_key.as_bytes())
        .map_err(|e| CryptoError::InvalidKeyMaterial(format!("{e:?}")))?;
    let trusted = PublicToken::verify(&pk, &untrusted, None, None).map_err(|e| {
        tracing::debug!(public_key = ?public_key, "v4.public signature rejected");
        CryptoError::SignatureInvalid(format!("{e:?}"))
    })?;
    Ok(trusted.payload().as_bytes().to_vec())
}

/// Decode the payload of a v4.public token WITHOUT verifying its signature.
///
/// Only for discovering which key to verify with (for example the claimed
/// issuer of an embedded credential). Anything read here is untrusted until
/// [`verify_public`] succeeds on the same token.
pub fn peek_payload(token: &str) -> Result<Vec<u8>, CryptoError> {
    let body = token
        .strip_prefix(TOKEN_HEADER)
        .ok_or_else(|| CryptoError::MalformedToken(format!("missing {TOKEN_HEADER} prefix")))?;
    let encoded = body.split('.').next().unwrap_or(body);
    let mut raw = URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|e| CryptoError::MalformedToken(format!("payload is not base64url: {e}")))?;
    if raw.len() < SIGNATURE_LENGTH {
        return Err(CryptoError::MalformedToken(format!(
            "token body is {} bytes, shorter than a signature",
            raw.len()
        )));
    }
    raw.truncate(raw.len() - SIGNATURE_LENGTH);
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({"iss": "did:key:zIssuer", "n": 1})).unwrap()
    }

    #[test]
    fn test_sign_produces_v4_public_token() {
        let kp = Ed25519KeyPair::generate();
        let token = sign_public(&kp, &payload()).unwrap();
        assert!(token.starts_with("v4.public."));
        assert_eq!(token.matches('.').count(), 2, "no footer segment");
    }

    #[test]
    fn test_sign_and_verify() {
        let kp = Ed25519KeyPair::generate();
        let token = sign_public(&kp, &payload()).unwrap();
        let recovered = verify_public(&token, &kp.public_key()).unwrap();
        assert_eq!(recovered, payload());
    }

    #[test]
    fn test_verify_wrong_key_fails() {
        let kp1 = Ed25519KeyPair::generate();
        let kp2 = Ed25519KeyPair::generate();
        let token = sign_public(&kp1, &payload()).unwrap();
        let err = verify_public(&token, &kp2.public_key()).unwrap_err();
        assert!(matches!(err, CryptoError::SignatureInvalid(_)));
    }

    #[test]
    fn test_verify_tampered_payload_fails() {
        let kp = Ed25519KeyPair::generate();
        let token = sign_public(&kp, &payload()).unwrap();
        let body = token.strip_prefix(TOKEN_HEADER).unwrap();
        let mut raw = URL_SAFE_NO_PAD.decode(body).unwrap();
        raw[0] ^= 0x01;
        let tampered = format!("{TOKEN_HEADER}{}", URL_SAFE_NO_PAD.encode(&raw));
        assert!(verify_public(&tampered, &kp.public_key()).is_err());
    }

    #[test]
    fn test_verify_garbage_is_malformed() {
        let kp = Ed25519KeyPair::generate();
        let err = verify_public("not-a-token", &kp.public_key()).unwrap_err();
        assert!(matches!(err, CryptoError::MalformedToken(_)));
    }

    #[test]
    fn test_verify_local_token_is_malformed() {
        let kp = Ed25519KeyPair::generate();
        let err = verify_public("v4.local.AAAA", &kp.public_key()).unwrap_err();
        assert!(matches!(err, CryptoError::MalformedToken(_)));
    }

    #[test]
    fn test_peek_payload_matches_signed_payload() {
        let kp = Ed25519KeyPair::generate();
        let token = sign_public(&kp, &payload()).unwrap();
        assert_eq!(peek_payload(&token).unwrap(), payload());
    }

    #[test]
    fn test_peek_payload_rejects_wrong_header() {
        assert!(matches!(
            peek_payload("v2.public.AAAA"),
            Err(CryptoError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_peek_payload_rejects_short_body() {
        let short = format!("{TOKEN_HEADER}{}", URL_SAFE_NO_PAD.encode([0u8; 10]));
        assert!(matches!(
            peek_payload(&short),
            Err(CryptoError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_signing_is_deterministic_for_same_key() {
        let kp = Ed25519KeyPair::from_seed(&[3u8; 32]);
        let t1 = sign_public(&kp, &payload()).unwrap();
        let t2 = sign_public(&kp, &payload()).unwrap();
        assert_eq!(t1, t2);
    }
}
