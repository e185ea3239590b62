//! # did:key Derivation
//!
//! Builds the identifier string and its minimal DID document from an Ed25519
//! public key. The document is a read-only view computed on demand; nothing
//! here is persisted.

use serde::{Deserialize, Serialize};
use veriglob_crypto::{Ed25519KeyPair, Ed25519PublicKey};

/// Multicodec prefix for an Ed25519 public key (varint `0xed`).
pub const ED25519_MULTICODEC: [u8; 2] = [0xed, 0x01];

/// Multibase prefix for base58btc.
pub const MULTIBASE_BASE58BTC: char = 'z';

/// Prefix shared by every identifier this crate produces.
pub const DID_KEY_PREFIX: &str = "did:key:";

/// JSON-LD context of the DID document.
pub const DID_CONTEXT_V1: &str = "https://www.w3.org/ns/did/v1";

/// Verification method type advertised for the key.
pub const VERIFICATION_KEY_TYPE: &str = "Ed25519VerificationKey2018";

/// Fragment naming the single verification method.
pub const KEY_FRAGMENT: &str = "#key-1";

/// A minimal DID document for `did:key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidDocument {
    /// JSON-LD contexts.
    #[serde(rename = "@context")]
    pub context: Vec<String>,
    /// The identifier the document describes.
    pub id: String,
    /// Exactly one Ed25519 verification method.
    pub verification_method: Vec<VerificationMethod>,
    /// References to the verification method usable for authentication.
    pub authentication: Vec<String>,
    /// References to the verification method usable for assertions.
    pub assertion_method: Vec<String>,
}

/// A verification method entry in a [`DidDocument`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMethod {
    pub id: String,
    #[serde(rename = "type")]
    pub method_type: String,
    pub controller: String,
    pub public_key_base58: String,
}

/// A `did:key` identifier together with its key and document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DidKey {
    did: String,
    public_key: Ed25519PublicKey,
    document: DidDocument,
}

/// Derive the `did:key` identifier and document for `public_key`.
pub fn derive(public_key: &Ed25519PublicKey) -> DidKey {
    let did = encode_identifier(public_key);
    let vm_id = format!("{did}{KEY_FRAGMENT}");

    let document = DidDocument {
        context: vec![DID_CONTEXT_V1.to_string()],
        id: did.clone(),
        verification_method: vec![VerificationMethod {
            id: vm_id.clone(),
            method_type: VERIFICATION_KEY_TYPE.to_string(),
            controller: did.clone(),
            public_key_base58: bs58::encode(public_key.as_bytes()).into_string(),
        }],
        authentication: vec![vm_id.clone()],
        assertion_method: vec![vm_id],
    };

    DidKey {
        did,
        public_key: *public_key,
        document,
    }
}

fn encode_identifier(public_key: &Ed25519PublicKey) -> String {
    let mut tagged = Vec::with_capacity(ED25519_MULTICODEC.len() + public_key.as_bytes().len());
    tagged.extend_from_slice(&ED25519_MULTICODEC);
    tagged.extend_from_slice(public_key.as_bytes());
    format!(
        "{DID_KEY_PREFIX}{MULTIBASE_BASE58BTC}{}",
        bs58::encode(tagged).into_string()
    )
}

impl DidKey {
    /// Derive from the public half of a key pair.
    pub fn from_keypair(keypair: &Ed25519KeyPair) -> Self {
        derive(&keypair.public_key())
    }

    /// The identifier string, `did:key:z...`.
    pub fn id(&self) -> &str {
        &self.did
    }

    pub fn public_key(&self) -> &Ed25519PublicKey {
        &self.public_key
    }

    pub fn document(&self) -> &DidDocument {
        &self.document
    }

    /// The id of the single verification method, `<did>#key-1`.
    pub fn verification_method_id(&self) -> String {
        format!("{}{KEY_FRAGMENT}", self.did)
    }

    /// The DID document as indented JSON.
    pub fn document_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.document)
    }

    /// Consume, returning the identifier string.
    pub fn into_string(self) -> String {
        self.did
    }
}

impl std::fmt::Display for DidKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.did)
    }
}
