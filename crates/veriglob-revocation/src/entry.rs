//! # Revocation Entries
//!
//! One registry record per issued credential, and the two-state lifecycle
//! it moves through.

use serde::{Deserialize, Deserializer, Serialize};
use veriglob_core::Timestamp;

use crate::error::RevocationError;

// ─── Revocation Status ──────────────────────────────────────────────

/// Lifecycle state of a registered credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevocationStatus {
    /// Issued and not revoked.
    Active,
    /// Permanently revoked (terminal).
    Revoked,
}

impl RevocationStatus {
    /// Whether this state is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Revoked)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Revoked => "revoked",
        }
    }
}

impl std::fmt::Display for RevocationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Revocation Entry ───────────────────────────────────────────────

/// A credential's registry record.
///
/// `revoked_at` and `reason` are `Some` exactly when `status` is
/// [`RevocationStatus::Revoked`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevocationEntry {
    pub credential_id: String,
    pub issuer_did: String,
    pub subject_did: String,
    pub status: RevocationStatus,
    pub issued_at: Timestamp,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "zero_time_as_none"
    )]
    pub revoked_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl RevocationEntry {
    /// A fresh Active entry.
    pub fn new(
        credential_id: impl Into<String>,
        issuer_did: impl Into<String>,
        subject_did: impl Into<String>,
        issued_at: Timestamp,
    ) -> Self {
        Self {
            credential_id: credential_id.into(),
            issuer_did: issuer_did.into(),
            subject_did: subject_did.into(),
            status: RevocationStatus::Active,
            issued_at,
            revoked_at: None,
            reason: None,
        }
    }

    pub fn is_revoked(&self) -> bool {
        self.status == RevocationStatus::Revoked
    }

    /// Check the status-dependent fields against `status`.
    ///
    /// A revoked entry without a reason is given an empty one; other
    /// writers omit an empty reason.
    pub(crate) fn normalize(&mut self) -> Result<(), String> {
        match self.status {
            RevocationStatus::Active => {
                if self.revoked_at.is_some() || self.reason.is_some() {
                    return Err(format!(
                        "active entry {:?} carries revocation details",
                        self.credential_id
                    ));
                }
            }
            RevocationStatus::Revoked => {
                if self.revoked_at.is_none() {
                    return Err(format!(
                        "revoked entry {:?} has no revokedAt",
                        self.credential_id
                    ));
                }
                self.reason.get_or_insert_with(String::new);
            }
        }
        Ok(())
    }

    /// Transition Active → Revoked.
    pub fn revoke(&mut self, reason: impl Into<String>, at: Timestamp) -> Result<(), RevocationError> {
        if self.status.is_terminal() {
            return Err(RevocationError::AlreadyRevoked {
                credential_id: self.credential_id.clone(),
                revoked_at: self.revoked_at.unwrap_or(self.issued_at),
            });
        }
        self.status = RevocationStatus::Revoked;
        self.revoked_at = Some(at);
        self.reason = Some(reason.into());
        Ok(())
    }
}

/// Registry files written by other implementations carry the zero time
/// `0001-01-01T00:00:00Z` for "not revoked"; read it as absent.
fn zero_time_as_none<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Timestamp>, D::Error> {
    let ts = Option::<Timestamp>::deserialize(deserializer)?;
    Ok(ts.filter(|t| t.epoch_secs() > ZERO_TIME_EPOCH_SECS))
}

/// Unix seconds of `0001-01-01T00:00:00Z`.
const ZERO_TIME_EPOCH_SECS: i64 = -62_135_596_800;
