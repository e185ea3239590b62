//! # veriglob-core: Foundational Types for Veriglob
//!
//! The leaf of the workspace DAG. Every other `veriglob-*` crate depends on
//! it; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **UTC-only timestamps.** [`Timestamp`] is UTC with a `Z` suffix and
//!    seconds precision, which is exactly what the token claims and the
//!    revocation registry file carry.
//!
//! 2. **Newtypes for identifiers.** [`CredentialId`] and [`PresentationId`]
//!    are `urn:uuid:` strings generated from 128 random bits. No bare
//!    `format!` calls for identifiers elsewhere in the workspace.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod temporal;

pub use error::ValidationError;
pub use identity::{CredentialId, PresentationId};
pub use temporal::Timestamp;
