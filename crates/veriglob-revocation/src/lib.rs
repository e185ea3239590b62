//! # veriglob-revocation: Credential Revocation Registry
//!
//! The only stateful component of the protocol. An issuer records every
//! credential id it hands out; verifiers ask whether an id is still active.
//!
//! ## States
//!
//! ```text
//! (unregistered) ──register──▶ Active ──revoke──▶ Revoked (terminal)
//! ```
//!
//! ## Concurrency
//!
//! [`Registry`] is `Send + Sync`. Lookups share a read lock; `register` and
//! `revoke` take the write lock and, for a file-backed registry, hold it
//! through the rewrite of the backing file. A failed write is reported but
//! does not roll back the in-memory change.

pub mod entry;
pub mod error;
pub mod registry;

pub use entry::{RevocationEntry, RevocationStatus};
pub use error::RevocationError;
pub use registry::{generate_credential_id, Registry};
