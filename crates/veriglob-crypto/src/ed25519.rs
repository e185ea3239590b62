//! # Ed25519 Key Material
//!
//! Key generation and import/export for the Ed25519 keys behind every
//! `did:key` identifier and every signed token.
//!
//! ## Security Invariant
//!
//! - Private keys are never serialized or logged. `Ed25519KeyPair` does
//!   not implement `Serialize`, and its `Debug` is redacted.
//! - Exported key-pair bytes come back in a [`Zeroizing`] buffer so the
//!   caller's copy is wiped on drop.
//! - Importing a 64-byte key pair checks that the public half matches the
//!   key derived from the seed, so a mismatched pair is rejected up front
//!   instead of producing tokens nobody can verify.
//!
//! ## Serde
//!
//! - Public keys serialize/deserialize as hex-encoded strings.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroizing;

use crate::error::CryptoError;
use crate::hex::{hex_prefix, hex_to_bytes, to_hex};

/// Length of an Ed25519 public key in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Length of an Ed25519 private key (seed) in bytes.
pub const SEED_LENGTH: usize = 32;

/// Length of an Ed25519 key pair (seed followed by public key) in bytes.
pub const KEYPAIR_LENGTH: usize = 64;

/// An Ed25519 public key (32 bytes) for signature verification.
///
/// Serializes as a hex-encoded string for JSON interoperability.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ed25519PublicKey([u8; PUBLIC_KEY_LENGTH]);

/// An Ed25519 key pair for signing operations.
///
/// Does not implement `Serialize`; private keys must not be accidentally
/// serialized into logs or output files.
pub struct Ed25519KeyPair {
    signing_key: ed25519_dalek::SigningKey,
}

// ---------------------------------------------------------------------------
// Ed25519PublicKey impls
// ---------------------------------------------------------------------------

impl Ed25519PublicKey {
    /// Create a public key from raw 32 bytes.
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Create a public key from a byte slice that must be exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; PUBLIC_KEY_LENGTH] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidKeyMaterial(format!(
                "public key must be {PUBLIC_KEY_LENGTH} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(arr))
    }

    /// Return the raw 32-byte public key.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }

    /// Render the public key as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        to_hex(&self.0)
    }

    /// Parse a public key from a 64-character hex string.
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let hex = hex.trim();
        if hex.len() != PUBLIC_KEY_LENGTH * 2 {
            return Err(CryptoError::InvalidKeyMaterial(format!(
                "public key hex must be {} chars, got {}",
                PUBLIC_KEY_LENGTH * 2,
                hex.len()
            )));
        }
        Self::from_slice(&hex_to_bytes(hex)?)
    }

    /// Convert to an `ed25519_dalek::VerifyingKey`, rejecting byte strings
    /// that are not a valid curve point.
    pub fn to_verifying_key(&self) -> Result<ed25519_dalek::VerifyingKey, CryptoError> {
        ed25519_dalek::VerifyingKey::from_bytes(&self.0)
            .map_err(|e| CryptoError::InvalidKeyMaterial(format!("invalid public key: {e}")))
    }
}

impl From<ed25519_dalek::VerifyingKey> for Ed25519PublicKey {
    fn from(vk: ed25519_dalek::VerifyingKey) -> Self {
        Self(vk.to_bytes())
    }
}

impl Serialize for Ed25519PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Ed25519PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519PublicKey({}...)", hex_prefix(&self.0))
    }
}

impl std::fmt::Display for Ed25519PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// Ed25519KeyPair impls
// ---------------------------------------------------------------------------

impl Ed25519KeyPair {
    /// Generate a new random Ed25519 key pair from the OS CSPRNG.
    pub fn generate() -> Self {
        let mut csprng = rand::rngs::OsRng;
        let signing_key = ed25519_dalek::SigningKey::generate(&mut csprng);
        Self { signing_key }
    }

    /// Create a key pair from a raw 32-byte private key seed.
    pub fn from_seed(seed: &[u8; SEED_LENGTH]) -> Self {
        let signing_key = ed25519_dalek::SigningKey::from_bytes(seed);
        Self { signing_key }
    }

    /// Create a key pair from 64 bytes: the seed followed by its public key.
    ///
    /// Fails with [`CryptoError::InvalidKeyMaterial`] if the length is wrong
    /// or the trailing public key does not belong to the seed.
    pub fn from_keypair_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: Zeroizing<[u8; KEYPAIR_LENGTH]> =
            Zeroizing::new(bytes.try_into().map_err(|_| {
                CryptoError::InvalidKeyMaterial(format!(
                    "private key must be {KEYPAIR_LENGTH} bytes, got {}",
                    bytes.len()
                ))
            })?);
        let signing_key = ed25519_dalek::SigningKey::from_keypair_bytes(&arr)
            .map_err(|e| CryptoError::InvalidKeyMaterial(format!("inconsistent key pair: {e}")))?;
        Ok(Self { signing_key })
    }

    /// Parse a key pair from hex: 64 characters for a seed, 128 for a full
    /// key pair.
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let bytes = Zeroizing::new(hex_to_bytes(hex)?);
        match bytes.len() {
            SEED_LENGTH => {
                let mut seed = Zeroizing::new([0u8; SEED_LENGTH]);
                seed.copy_from_slice(&bytes);
                Ok(Self::from_seed(&seed))
            }
            KEYPAIR_LENGTH => Self::from_keypair_bytes(&bytes),
            n => Err(CryptoError::InvalidKeyMaterial(format!(
                "private key hex must decode to {SEED_LENGTH} or {KEYPAIR_LENGTH} bytes, got {n}"
            ))),
        }
    }

    /// Export the 64-byte key pair (seed followed by public key).
    pub fn to_keypair_bytes(&self) -> Zeroizing<[u8; KEYPAIR_LENGTH]> {
        Zeroizing::new(self.signing_key.to_keypair_bytes())
    }

    /// Export the 64-byte key pair as lowercase hex.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(to_hex(self.to_keypair_bytes().as_slice()))
    }

    /// Get the public key from this key pair.
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey::from(self.signing_key.verifying_key())
    }
}

impl std::fmt::Debug for Ed25519KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519KeyPair(<private>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypair_generation() {
        let kp = Ed25519KeyPair::generate();
        let pk = kp.public_key();
        assert_eq!(pk.as_bytes().len(), 32);
        pk.to_verifying_key().expect("generated key is a valid point");
    }

    #[test]
    fn test_generated_keypairs_differ() {
        let kp1 = Ed25519KeyPair::generate();
        let kp2 = Ed25519KeyPair::generate();
        assert_ne!(kp1.public_key(), kp2.public_key());
    }

    #[test]
    fn test_deterministic_from_seed() {
        let seed = [42u8; 32];
        let kp1 = Ed25519KeyPair::from_seed(&seed);
        let kp2 = Ed25519KeyPair::from_seed(&seed);
        assert_eq!(kp1.public_key(), kp2.public_key());
    }

    #[test]
    fn test_keypair_bytes_layout() {
        let kp = Ed25519KeyPair::from_seed(&[7u8; 32]);
        let bytes = kp.to_keypair_bytes();
        assert_eq!(&bytes[..32], &[7u8; 32]);
        assert_eq!(&bytes[32..], kp.public_key().as_bytes());
    }

    #[test]
    fn test_keypair_bytes_roundtrip() {
        let kp = Ed25519KeyPair::generate();
        let bytes = kp.to_keypair_bytes();
        let kp2 = Ed25519KeyPair::from_keypair_bytes(bytes.as_slice()).unwrap();
        assert_eq!(kp.public_key(), kp2.public_key());
    }

    #[test]
    fn test_from_keypair_bytes_wrong_length() {
        let err = Ed25519KeyPair::from_keypair_bytes(&[0u8; 32]).unwrap_err();
        assert!(matches!(err, CryptoError::InvalidKeyMaterial(_)));
        assert!(err.to_string().contains("64 bytes, got 32"));
    }

    #[test]
    fn test_from_keypair_bytes_mismatched_public_half() {
        let kp = Ed25519KeyPair::from_seed(&[1u8; 32]);
        let other = Ed25519KeyPair::from_seed(&[2u8; 32]);
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&[1u8; 32]);
        bytes[32..].copy_from_slice(other.public_key().as_bytes());
        assert_ne!(kp.public_key(), other.public_key());
        assert!(matches!(
            Ed25519KeyPair::from_keypair_bytes(&bytes),
            Err(CryptoError::InvalidKeyMaterial(_))
        ));
    }

    #[test]
    fn test_from_hex_seed_and_keypair_forms() {
        let kp = Ed25519KeyPair::from_seed(&[9u8; 32]);
        let seed_hex = to_hex(&[9u8; 32]);
        let full_hex = kp.to_hex();
        assert_eq!(full_hex.len(), 128);

        let from_seed = Ed25519KeyPair::from_hex(&seed_hex).unwrap();
        let from_full = Ed25519KeyPair::from_hex(&full_hex).unwrap();
        assert_eq!(from_seed.public_key(), kp.public_key());
        assert_eq!(from_full.public_key(), kp.public_key());
    }

    #[test]
    fn test_from_hex_wrong_length() {
        assert!(matches!(
            Ed25519KeyPair::from_hex("abcd"),
            Err(CryptoError::InvalidKeyMaterial(_))
        ));
        assert!(matches!(
            Ed25519KeyPair::from_hex("xyz"),
            Err(CryptoError::HexDecode(_))
        ));
    }

    #[test]
    fn test_public_key_from_slice() {
        let kp = Ed25519KeyPair::generate();
        let pk = Ed25519PublicKey::from_slice(kp.public_key().as_bytes()).unwrap();
        assert_eq!(pk, kp.public_key());
        assert!(Ed25519PublicKey::from_slice(&[0u8; 31]).is_err());
        assert!(Ed25519PublicKey::from_slice(&[0u8; 33]).is_err());
    }

    #[test]
    fn test_public_key_hex_roundtrip() {
        let kp = Ed25519KeyPair::generate();
        let pk = kp.public_key();
        let hex = pk.to_hex();
        assert_eq!(hex.len(), 64);
        let pk2 = Ed25519PublicKey::from_hex(&hex).unwrap();
        assert_eq!(pk, pk2);
    }

    #[test]
    fn test_public_key_from_hex_wrong_length() {
        assert!(Ed25519PublicKey::from_hex("abcd").is_err());
    }

    #[test]
    fn test_public_key_serde_json_roundtrip() {
        let pk = Ed25519KeyPair::generate().public_key();
        let json = serde_json::to_string(&pk).unwrap();
        assert!(json.starts_with('"'));
        assert_eq!(json.len(), 64 + 2);
        let pk2: Ed25519PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(pk, pk2);
    }

    #[test]
    fn test_keypair_debug_is_redacted() {
        let kp = Ed25519KeyPair::from_seed(&[0xAB; 32]);
        let dbg = format!("{kp:?}");
        assert_eq!(dbg, "Ed25519KeyPair(<private>)");
        assert!(!dbg.contains("abab"));
    }

    #[test]
    fn test_public_key_debug_shows_prefix_only() {
        let pk = Ed25519KeyPair::generate().public_key();
        let dbg = format!("{pk:?}");
        assert!(dbg.starts_with("Ed25519PublicKey("));
        assert!(dbg.ends_with("...)"));
        assert!(!dbg.contains(&pk.to_hex()));
    }
}
