//! Errors from registry lookups, transitions, and persistence.

use std::path::PathBuf;

use thiserror::Error;
use veriglob_core::{Timestamp, ValidationError};

/// Errors from [`Registry`](crate::Registry) operations.
#[derive(Error, Debug)]
pub enum RevocationError {
    /// No entry is registered under this credential id.
    #[error("credential {0:?} not found in registry")]
    EntryNotFound(String),

    /// Revoked is terminal; a credential can be revoked once.
    #[error("credential {credential_id:?} already revoked at {revoked_at}")]
    AlreadyRevoked {
        credential_id: String,
        revoked_at: Timestamp,
    },

    /// Reading or writing the backing file failed. For writes, the in-memory
    /// registry already reflects the change.
    #[error("registry persistence failed for {path}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A credential id offered for registration or revocation is unusable.
    #[error("{0}")]
    InvalidCredentialId(#[from] ValidationError),

    /// The backing file exists but does not hold a consistent registry.
    #[error("corrupt registry file {path}: {reason}")]
    CorruptRegistry { path: PathBuf, reason: String },

    /// Entries could not be serialized.
    #[error("registry serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
