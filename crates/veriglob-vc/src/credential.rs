//! # Credential Tokens: Issuance and Verification
//!
//! A credential token is a v4.public token whose payload is the JSON claim
//! set
//!
//! ```text
//! { iss, sub, jti?, iat, exp,
//!   vc: { id?, type: ["VerifiableCredential", <tag>],
//!         credentialSubject: {...},
//!         credentialStatus?: { id, type: "RevocationRegistry2024" } } }
//! ```
//!
//! `jti`, `vc.id` and `vc.credentialStatus` are present exactly when the
//! issuer supplied a credential id; that id is the key a verifier looks up
//! in the revocation registry.
//!
//! ## Verification Modes
//!
//! - [`verify_credential`] checks signature, structure, and expiry.
//! - [`decode_credential`] checks signature and structure only. Use it to
//!   inspect stale credentials; never to accept them.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use veriglob_core::{CredentialId, Timestamp};
use veriglob_crypto::{token, Ed25519KeyPair, Ed25519PublicKey};

use crate::error::VcError;
use crate::subject::{CredentialSubject, CredentialType};

/// Base type present in every credential's `type` list.
pub const VERIFIABLE_CREDENTIAL_TYPE: &str = "VerifiableCredential";

/// Status scheme tag pointing verifiers at the issuer's revocation registry.
pub const REVOCATION_STATUS_TYPE: &str = "RevocationRegistry2024";

/// Validity window of a credential, counted from issuance.
pub const CREDENTIAL_VALIDITY_DAYS: i64 = 365;

// ─── Claim Types ────────────────────────────────────────────────────

/// Pointer from a credential to its revocation registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialStatus {
    /// Registry key; equal to the credential id.
    pub id: String,
    #[serde(rename = "type")]
    pub status_type: String,
}

/// The `vc` claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// `["VerifiableCredential", <subject tag>]`.
    #[serde(rename = "type")]
    pub types: Vec<String>,
    pub credential_subject: CredentialSubject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_status: Option<CredentialStatus>,
}

/// The full claim set of a credential token.
///
/// Immutable once issued; verification only ever reconstructs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCredentialClaims")]
pub struct CredentialClaims {
    /// Issuer DID.
    #[serde(rename = "iss")]
    pub issuer: String,
    /// Subject DID.
    #[serde(rename = "sub")]
    pub subject: String,
    /// Token id; duplicates the credential id when one was supplied.
    #[serde(rename = "jti", skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
    #[serde(rename = "iat")]
    pub issued_at: Timestamp,
    #[serde(rename = "exp")]
    pub expires_at: Timestamp,
    #[serde(rename = "vc")]
    pub credential: CredentialPayload,
}

/// Wire shape of the claims before the subject's tag has been read.
#[derive(Deserialize)]
struct RawCredentialClaims {
    iss: String,
    sub: String,
    #[serde(default)]
    jti: Option<String>,
    iat: Timestamp,
    exp: Timestamp,
    vc: RawCredentialPayload,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCredentialPayload {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "type")]
    types: Vec<String>,
    credential_subject: serde_json::Value,
    #[serde(default)]
    credential_status: Option<CredentialStatus>,
}

impl TryFrom<RawCredentialPayload> for CredentialPayload {
    type Error = VcError;

    fn try_from(raw: RawCredentialPayload) -> Result<Self, VcError> {
        if !raw.types.iter().any(|t| t == VERIFIABLE_CREDENTIAL_TYPE) {
            return Err(VcError::MalformedToken(format!(
                "vc.type {:?} lacks {VERIFIABLE_CREDENTIAL_TYPE}",
                raw.types
            )));
        }
        let credential_type = raw
            .types
            .iter()
            .find_map(|t| CredentialType::from_tag(t))
            .ok_or_else(|| VcError::UnknownCredentialType(raw.types.join(", ")))?;
        let credential_subject =
            CredentialSubject::from_value(credential_type, raw.credential_subject).map_err(
                |e| match e {
                    VcError::InvalidSubject(msg) => {
                        VcError::MalformedToken(format!("vc.credentialSubject: {msg}"))
                    }
                    other => other,
                },
            )?;
        Ok(Self {
            id: raw.id.filter(|id| !id.is_empty()),
            types: raw.types,
            credential_subject,
            credential_status: raw.credential_status,
        })
    }
}

impl TryFrom<RawCredentialClaims> for CredentialClaims {
    type Error = VcError;

    fn try_from(raw: RawCredentialClaims) -> Result<Self, VcError> {
        Ok(Self {
            issuer: raw.iss,
            subject: raw.sub,
            token_id: raw.jti.filter(|id| !id.is_empty()),
            issued_at: raw.iat,
            expires_at: raw.exp,
            credential: CredentialPayload::try_from(raw.vc)?,
        })
    }
}

impl CredentialClaims {
    /// The credential id used for revocation lookups: the token id if
    /// present, else the payload's embedded id.
    pub fn credential_id(&self) -> Option<&str> {
        self.token_id
            .as_deref()
            .or(self.credential.id.as_deref())
    }

    pub fn credential_subject(&self) -> &CredentialSubject {
        &self.credential.credential_subject
    }

    pub fn credential_type(&self) -> CredentialType {
        self.credential.credential_subject.credential_type()
    }

    /// True once `now` is strictly after `exp`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now > self.expires_at
    }

    pub fn ensure_not_expired(&self, now: Timestamp) -> Result<(), VcError> {
        if self.is_expired(now) {
            return Err(VcError::CredentialExpired {
                expired_at: self.expires_at,
            });
        }
        Ok(())
    }
}

// ─── Issuance ───────────────────────────────────────────────────────

/// Issue a credential token signed by `issuer_key`, valid for one year from
/// now.
///
/// `credential_id` is embedded as `jti`, `vc.id`, and a revocation status
/// reference. `None` and `Some("")` both mean no id; any other value must
/// pass [`CredentialId::new`].
pub fn issue_credential(
    issuer_did: &str,
    subject_did: &str,
    issuer_key: &Ed25519KeyPair,
    subject: &CredentialSubject,
    credential_id: Option<&str>,
) -> Result<String, VcError> {
    issue_credential_at(
        issuer_did,
        subject_did,
        issuer_key,
        subject,
        credential_id,
        Timestamp::now(),
    )
}

/// [`issue_credential`] with an explicit issuance time.
pub fn issue_credential_at(
    issuer_did: &str,
    subject_did: &str,
    issuer_key: &Ed25519KeyPair,
    subject: &CredentialSubject,
    credential_id: Option<&str>,
    issued_at: Timestamp,
) -> Result<String, VcError> {
    let parsed_id = credential_id
        .filter(|id| !id.is_empty())
        .map(CredentialId::new)
        .transpose()
        .map_err(VcError::InvalidCredentialId)?;
    let credential_id = parsed_id.as_ref().map(CredentialId::as_str);
    let expires_at = issued_at.checked_add(Duration::days(CREDENTIAL_VALIDITY_DAYS))?;

    let claims = CredentialClaims {
        issuer: issuer_did.to_string(),
        subject: subject_did.to_string(),
        token_id: credential_id.map(str::to_string),
        issued_at,
        expires_at,
        credential: CredentialPayload {
            id: credential_id.map(str::to_string),
            types: vec![
                VERIFIABLE_CREDENTIAL_TYPE.to_string(),
                subject.tag().to_string(),
            ],
            credential_subject: subject.clone(),
            credential_status: credential_id.map(|id| CredentialStatus {
                id: id.to_string(),
                status_type: REVOCATION_STATUS_TYPE.to_string(),
            }),
        },
    };

    let payload = serde_json::to_vec(&claims)?;
    let token = token::sign_public(issuer_key, &payload)?;
    tracing::debug!(
        issuer = %issuer_did,
        subject = %subject_did,
        credential_type = %subject.credential_type(),
        credential_id = credential_id.unwrap_or_default(),
        "issued credential"
    );
    Ok(token)
}

// ─── Verification ───────────────────────────────────────────────────

/// Verify a credential token: signature, structure, and expiry.
pub fn verify_credential(
    token: &str,
    issuer_key: &Ed25519PublicKey,
) -> Result<CredentialClaims, VcError> {
    verify_credential_at(token, issuer_key, Timestamp::now())
}

/// [`verify_credential`] against an explicit clock.
pub fn verify_credential_at(
    token: &str,
    issuer_key: &Ed25519PublicKey,
    now: Timestamp,
) -> Result<CredentialClaims, VcError> {
    let claims = decode_credential(token, issuer_key)?;
    claims.ensure_not_expired(now).map_err(|e| {
        tracing::debug!(
            issuer = %claims.issuer,
            expires_at = %claims.expires_at,
            "rejected expired credential"
        );
        e
    })?;
    Ok(claims)
}

/// Verify signature and structure only; an expired credential is returned
/// as-is.
pub fn decode_credential(
    token: &str,
    issuer_key: &Ed25519PublicKey,
) -> Result<CredentialClaims, VcError> {
    let payload = token::verify_public(token, issuer_key)?;
    let raw: RawCredentialClaims = serde_json::from_slice(&payload)
        .map_err(|e| VcError::MalformedToken(format!("credential claims: {e}")))?;
    CredentialClaims::try_from(raw)
}

/// Read the `iss` claim of a credential token WITHOUT verifying it.
///
/// Lets a verifier find which `did:key` to resolve for an embedded
/// credential. The result is untrusted until [`verify_credential`] succeeds
/// with the resolved key.
pub fn peek_credential_issuer(token: &str) -> Result<String, VcError> {
    #[derive(Deserialize)]
    struct IssuerOnly {
        iss: String,
    }

    let payload = token::peek_payload(token)?;
    let claims: IssuerOnly = serde_json::from_slice(&payload)
        .map_err(|e| VcError::MalformedToken(format!("credential claims: {e}")))?;
    Ok(claims.iss)
}
