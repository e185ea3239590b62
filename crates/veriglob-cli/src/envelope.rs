//! JSON envelopes exchanged between the issuer, holder, and verifier
//! commands.
//!
//! `issue` writes a [`CredentialEnvelope`], `present` reads credential
//! envelopes and writes a [`PresentationEnvelope`], and `verify` accepts
//! either. Every field defaults on read so hand-written files only need the
//! token.

use serde::{Deserialize, Serialize};

/// A party identified by DID, with its public key in hex.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyedParty {
    #[serde(default)]
    pub did: String,
    #[serde(default)]
    pub public_key: String,
}

/// A party identified by DID only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    #[serde(default)]
    pub did: String,
}

/// Output of `veriglob issue`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialEnvelope {
    #[serde(default)]
    pub credential_id: String,
    #[serde(default)]
    pub issuer: KeyedParty,
    #[serde(default)]
    pub subject: Party,
    #[serde(default)]
    pub credential_type: String,
    pub token: String,
}

/// Output of `veriglob present`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationEnvelope {
    #[serde(default)]
    pub holder: KeyedParty,
    #[serde(default)]
    pub audience: String,
    #[serde(default)]
    pub nonce: String,
    /// Credential ids of the embedded credentials, where known.
    #[serde(default)]
    pub credentials: Vec<String>,
    pub presentation: String,
}
