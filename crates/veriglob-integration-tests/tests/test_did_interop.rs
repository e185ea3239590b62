//! # did:key Interoperability Test
//!
//! Identifiers must match the multicodec/multibase encoding other did:key
//! implementations produce, and resolution must be the exact inverse of
//! derivation.

use proptest::prelude::*;
use veriglob_crypto::Ed25519KeyPair;
use veriglob_did::{derive, resolve, resolve_did_key, DidError};
use veriglob_vc::{issue_credential, verify_credential, CredentialSubject, MembershipSubject};

/// Published did:key test vector for an Ed25519 key.
const VECTOR_DID: &str = "did:key:z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK";

#[test]
fn published_vector_round_trips() {
    let key = resolve(VECTOR_DID).unwrap();
    assert_eq!(derive(&key).id(), VECTOR_DID);

    let doc = resolve_did_key(VECTOR_DID).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&doc.document_json_pretty().unwrap()).unwrap();
    assert_eq!(json["id"], VECTOR_DID);
    assert_eq!(
        json["verificationMethod"][0]["id"],
        format!("{VECTOR_DID}#key-1")
    );
    assert_eq!(json["verificationMethod"][0]["controller"], VECTOR_DID);
    assert_eq!(json["authentication"][0], format!("{VECTOR_DID}#key-1"));
}

#[test]
fn zero_seed_vector() {
    let kp = Ed25519KeyPair::from_seed(&[0u8; 32]);
    assert_eq!(
        derive(&kp.public_key()).id(),
        "did:key:z6MkiTBz1ymuepAQ4HEHYSF1H8quG5GLVVQR3djdX3mDooWp"
    );
}

#[test]
fn malformed_identifiers_rejected() {
    assert!(matches!(
        resolve("did:web:example.com"),
        Err(DidError::UnsupportedMethod(_))
    ));
    assert!(resolve("did:key:").is_err());
    assert!(resolve("did:key:6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK").is_err());
    assert!(resolve("did:key:z0OIl").is_err());
    assert!(resolve("not-a-did").is_err());
}

#[test]
fn credential_verifies_with_key_resolved_from_issuer_did() {
    let issuer = Ed25519KeyPair::generate();
    let issuer_did = derive(&issuer.public_key());
    let subject: CredentialSubject = MembershipSubject {
        id: "did:key:z6MkMember".to_string(),
        organization_name: "Chess Club".to_string(),
        organization_did: Some(issuer_did.id().to_string()),
        membership_id: None,
        membership_type: Some("annual".to_string()),
        role: None,
        roles: vec!["treasurer".to_string(), "member".to_string()],
        access_level: None,
        start_date: "2025-09-01".to_string(),
        expiration_date: Some("2026-08-31".to_string()),
        active_member: true,
    }
    .into();
    let token = issue_credential(
        issuer_did.id(),
        "did:key:z6MkMember",
        &issuer,
        &subject,
        None,
    )
    .unwrap();

    let claims = verify_credential(&token, &resolve(issuer_did.id()).unwrap()).unwrap();
    assert_eq!(claims.credential_subject(), &subject);
    assert_eq!(claims.credential_id(), None);
}

proptest! {
    #[test]
    fn derive_resolve_is_identity(seed in proptest::array::uniform32(any::<u8>())) {
        let public_key = Ed25519KeyPair::from_seed(&seed).public_key();
        let did = derive(&public_key);
        prop_assert!(did.id().starts_with("did:key:z6Mk"));
        prop_assert_eq!(resolve(did.id()).unwrap(), public_key);
    }
}
