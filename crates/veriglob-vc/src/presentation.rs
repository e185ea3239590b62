//! # Presentation Tokens
//!
//! A holder bundles one or more credential tokens into a presentation
//! token bound to a verifier (`aud`) and a challenge (`nonce`):
//!
//! ```text
//! { iss: holder, sub: holder, aud, nonce, iat, exp,
//!   vp: { "@context": [...], type: ["VerifiablePresentation"],
//!         id: "urn:uuid:...", holder, verifiableCredential: [token, ...] } }
//! ```
//!
//! Presentations always live fifteen minutes, independent of the expiry of
//! anything they embed. Expiry is always enforced on verification.
//!
//! Embedded credentials are carried as opaque strings and are NOT verified
//! here.

use chrono::Duration;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use veriglob_core::{PresentationId, Timestamp};
use veriglob_crypto::hex::to_hex;
use veriglob_crypto::{token, Ed25519KeyPair, Ed25519PublicKey};

use crate::error::VcError;

pub const CREDENTIALS_CONTEXT_V1: &str = "https://www.w3.org/2018/credentials/v1";
pub const VERIFIABLE_PRESENTATION_TYPE: &str = "VerifiablePresentation";

/// Validity window of a presentation, counted from issuance.
pub const PRESENTATION_VALIDITY_MINUTES: i64 = 15;

/// Random bytes in a generated nonce.
pub const NONCE_BYTES: usize = 32;

/// The `vp` claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationPayload {
    #[serde(rename = "@context")]
    pub context: Vec<String>,
    #[serde(rename = "type")]
    pub types: Vec<String>,
    #[serde(default)]
    pub id: String,
    pub holder: String,
    /// Embedded credential tokens, in the order the holder supplied them.
    pub verifiable_credential: Vec<String>,
}

/// The full claim set of a presentation token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationClaims {
    /// The holder; the presentation's issuer.
    #[serde(rename = "iss")]
    pub issuer: String,
    /// The holder again.
    #[serde(rename = "sub")]
    pub subject: String,
    /// The verifier this presentation is meant for.
    #[serde(rename = "aud")]
    pub audience: String,
    pub nonce: String,
    #[serde(rename = "iat")]
    pub issued_at: Timestamp,
    #[serde(rename = "exp")]
    pub expires_at: Timestamp,
    #[serde(rename = "vp")]
    pub presentation: PresentationPayload,
}

impl PresentationClaims {
    /// Embedded credential tokens, unverified, in original order.
    pub fn credentials(&self) -> &[String] {
        &self.presentation.verifiable_credential
    }

    pub fn holder(&self) -> &str {
        &self.presentation.holder
    }
}

/// A fresh challenge: 32 bytes from the OS CSPRNG, hex-encoded.
pub fn generate_nonce() -> String {
    let mut bytes = [0u8; NONCE_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    to_hex(&bytes)
}

/// Sign a presentation of `credentials` for `audience`.
///
/// An empty `nonce` is replaced by [`generate_nonce`]; read it back from the
/// token's claims if the caller needs it.
pub fn present(
    holder_did: &str,
    holder_key: &Ed25519KeyPair,
    credentials: &[String],
    audience: &str,
    nonce: &str,
) -> Result<String, VcError> {
    present_at(
        holder_did,
        holder_key,
        credentials,
        audience,
        nonce,
        Timestamp::now(),
    )
}

/// [`present`] with an explicit issuance time.
pub fn present_at(
    holder_did: &str,
    holder_key: &Ed25519KeyPair,
    credentials: &[String],
    audience: &str,
    nonce: &str,
    issued_at: Timestamp,
) -> Result<String, VcError> {
    if credentials.is_empty() {
        return Err(VcError::EmptyCredentialSet);
    }
    let nonce = if nonce.is_empty() {
        generate_nonce()
    } else {
        nonce.to_string()
    };
    let presentation_id = PresentationId::generate();

    let claims = PresentationClaims {
        issuer: holder_did.to_string(),
        subject: holder_did.to_string(),
        audience: audience.to_string(),
        nonce,
        issued_at,
        expires_at: issued_at.checked_add(Duration::minutes(PRESENTATION_VALIDITY_MINUTES))?,
        presentation: PresentationPayload {
            context: vec![CREDENTIALS_CONTEXT_V1.to_string()],
            types: vec![VERIFIABLE_PRESENTATION_TYPE.to_string()],
            id: presentation_id.to_string(),
            holder: holder_did.to_string(),
            verifiable_credential: credentials.to_vec(),
        },
    };

    let token = token::sign_public(holder_key, &serde_json::to_vec(&claims)?)?;
    tracing::debug!(
        holder = %holder_did,
        audience = %audience,
        presentation_id = %presentation_id,
        credentials = credentials.len(),
        "created presentation"
    );
    Ok(token)
}

/// Verify a presentation token against the holder's key.
///
/// Checks run in order: signature, claim structure, audience, nonce,
/// expiry. An empty `expected_audience` or `expected_nonce` skips that
/// check.
pub fn verify_presentation(
    token: &str,
    holder_key: &Ed25519PublicKey,
    expected_audience: &str,
    expected_nonce: &str,
) -> Result<PresentationClaims, VcError> {
    verify_presentation_at(
        token,
        holder_key,
        expected_audience,
        expected_nonce,
        Timestamp::now(),
    )
}

/// [`verify_presentation`] against an explicit clock.
pub fn verify_presentation_at(
    token: &str,
    holder_key: &Ed25519PublicKey,
    expected_audience: &str,
    expected_nonce: &str,
    now: Timestamp,
) -> Result<PresentationClaims, VcError> {
    let payload = token::verify_public(token, holder_key)?;
    let claims: PresentationClaims = serde_json::from_slice(&payload)
        .map_err(|e| VcError::MalformedToken(format!("presentation claims: {e}")))?;

    if !expected_audience.is_empty() && claims.audience != expected_audience {
        tracing::debug!(expected = %expected_audience, actual = %claims.audience, "audience mismatch");
        return Err(VcError::AudienceMismatch {
            expected: expected_audience.to_string(),
            actual: claims.audience,
        });
    }
    if !expected_nonce.is_empty() && claims.nonce != expected_nonce {
        tracing::debug!(holder = %claims.issuer, "nonce mismatch");
        return Err(VcError::NonceMismatch);
    }
    if now > claims.expires_at {
        tracing::debug!(holder = %claims.issuer, expires_at = %claims.expires_at, "presentation expired");
        return Err(VcError::PresentationExpired {
            expired_at: claims.expires_at,
        });
    }
    Ok(claims)
}
