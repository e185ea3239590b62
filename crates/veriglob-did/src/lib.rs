//! # veriglob-did: The did:key Identifier Codec
//!
//! Derives `did:key` identifiers and their DID documents from Ed25519 public
//! keys, and resolves identifiers back to the key they encode.
//!
//! ```text
//! did:key:z<base58btc(0xED 0x01 ‖ 32-byte public key)>
//! ```
//!
//! Both directions are pure functions of their input. There is no network
//! resolution and no cache; a `did:key` identifier *is* its key.

pub mod did_key;
pub mod error;
pub mod resolver;

pub use did_key::{derive, DidDocument, DidKey, VerificationMethod};
pub use error::DidError;
pub use resolver::{resolve, resolve_did_key};
