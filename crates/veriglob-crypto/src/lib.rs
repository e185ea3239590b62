//! # veriglob-crypto: Cryptographic Primitives
//!
//! Provides the cryptographic building blocks for Veriglob:
//!
//! - **Ed25519** key pairs and public keys, the only key type the
//!   `did:key` identifiers and signed tokens use.
//! - **v4.public tokens**: signature-only tokens whose payload is readable
//!   and whose integrity is protected by an Ed25519 signature.
//! - **Hex** helpers shared by the workspace for key import/export and
//!   nonce rendering.
//!
//! ## Crate Policy
//!
//! - No internal dependencies. `veriglob-core` is not needed: keys and
//!   tokens carry no timestamps or identifiers of their own.
//! - No mocking of cryptographic operations in tests; every test signs and
//!   verifies with real keys.
//! - Private key bytes never reach `Debug`, `Display`, or a log line.

pub mod ed25519;
pub mod error;
pub mod hex;
pub mod token;

pub use ed25519::{Ed25519KeyPair, Ed25519PublicKey};
pub use error::CryptoError;
pub use token::{peek_payload, sign_public, verify_public};
