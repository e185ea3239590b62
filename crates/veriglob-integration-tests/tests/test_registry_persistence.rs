//! # Revocation Registry Persistence Test
//!
//! The registry file is the issuer's durable record. These tests cover
//! reopen after every mutation, concurrent writers through one handle,
//! compatibility with files that mark active entries with the zero time,
//! and rejection of corrupt or self-contradictory files.

use std::sync::Arc;
use std::thread;

use veriglob_revocation::{generate_credential_id, Registry, RevocationError, RevocationStatus};

// ---------------------------------------------------------------------------
// 1. Durability
// ---------------------------------------------------------------------------

#[test]
fn every_mutation_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("revocation_registry.json");

    {
        let registry = Registry::open(&path).unwrap();
        assert!(registry.is_empty());
        registry.register("cred-a", "did:key:zIssuer", "did:key:zAlice").unwrap();
        registry.register("cred-b", "did:key:zIssuer", "did:key:zBob").unwrap();
    }

    let (a_before, b_before) = {
        let registry = Registry::open(&path).unwrap();
        assert_eq!(registry.len(), 2);
        registry.revoke("cred-b", "left the company").unwrap();
        (
            registry.check_status("cred-a").unwrap(),
            registry.check_status("cred-b").unwrap(),
        )
    };

    let registry = Registry::open(&path).unwrap();
    let a = registry.check_status("cred-a").unwrap();
    let b = registry.check_status("cred-b").unwrap();
    assert_eq!(a, a_before);
    assert_eq!(b, b_before);
    assert_eq!(a.status, RevocationStatus::Active);
    assert_eq!(a.revoked_at, None);
    assert_eq!(b.status, RevocationStatus::Revoked);
    assert!(b.revoked_at.is_some());
    assert_eq!(b.reason.as_deref(), Some("left the company"));
}

#[test]
fn file_matches_export() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registry.json");
    let registry = Registry::open(&path).unwrap();
    registry.register("cred-1", "did:key:zI", "did:key:zS").unwrap();
    registry.revoke("cred-1", "expired membership").unwrap();

    let on_disk: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    let exported: serde_json::Value = serde_json::from_slice(&registry.export().unwrap()).unwrap();
    assert_eq!(on_disk, exported);
    assert_eq!(on_disk["cred-1"]["status"], "revoked");
    assert_eq!(on_disk["cred-1"]["issuerDid"], "did:key:zI");
}

// ---------------------------------------------------------------------------
// 2. Concurrency
// ---------------------------------------------------------------------------

#[test]
fn concurrent_registrations_all_persist() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registry.json");
    let registry = Arc::new(Registry::open(&path).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let mut ids = Vec::new();
                for _ in 0..10 {
                    let id = generate_credential_id();
                    registry
                        .register(&id, &format!("did:key:zIssuer{worker}"), "did:key:zSubject")
                        .unwrap();
                    ids.push(id);
                }
                ids
            })
        })
        .collect();

    let ids: Vec<String> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    assert_eq!(ids.len(), 80);
    assert_eq!(registry.len(), 80);

    let reopened = Registry::open(&path).unwrap();
    assert_eq!(reopened.len(), 80);
    for id in &ids {
        assert!(!reopened.is_revoked(id).unwrap());
    }
    assert_eq!(reopened.list_by_issuer("did:key:zIssuer3").len(), 10);
}

// ---------------------------------------------------------------------------
// 3. Foreign and damaged files
// ---------------------------------------------------------------------------

#[test]
fn zero_time_revoked_at_loads_as_active() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registry.json");
    std::fs::write(
        &path,
        r#"{
  "urn:uuid:0f8fad5b-d9cb-469f-a165-70867728950e": {
    "credentialId": "urn:uuid:0f8fad5b-d9cb-469f-a165-70867728950e",
    "issuerDid": "did:key:z6MkIssuer",
    "subjectDid": "did:key:z6MkSubject",
    "status": "active",
    "issuedAt": "2025-11-02T09:30:00.123456+05:30",
    "revokedAt": "0001-01-01T00:00:00Z"
  }
}"#,
    )
    .unwrap();

    let registry = Registry::open(&path).unwrap();
    let entry = registry
        .check_status("urn:uuid:0f8fad5b-d9cb-469f-a165-70867728950e")
        .unwrap();
    assert_eq!(entry.status, RevocationStatus::Active);
    assert_eq!(entry.revoked_at, None);

    // And can still be revoked.
    registry
        .revoke("urn:uuid:0f8fad5b-d9cb-469f-a165-70867728950e", "rotated")
        .unwrap();
}

#[test]
fn corrupt_file_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registry.json");
    std::fs::write(&path, "{ \"cred\": [").unwrap();
    assert!(matches!(
        Registry::open(&path),
        Err(RevocationError::CorruptRegistry { .. })
    ));
}

#[test]
fn self_contradictory_file_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registry.json");
    std::fs::write(
        &path,
        r#"{
  "a": {
    "credentialId": "b",
    "issuerDid": "did:key:zIssuer",
    "subjectDid": "did:key:zSubject",
    "status": "revoked",
    "issuedAt": "2026-01-15T12:00:00Z"
  }
}"#,
    )
    .unwrap();
    assert!(matches!(
        Registry::open(&path),
        Err(RevocationError::CorruptRegistry { .. })
    ));
}

#[test]
fn malformed_credential_id_is_refused() {
    let registry = Registry::in_memory();
    assert!(matches!(
        registry.register("cred 42", "did:key:zI", "did:key:zS"),
        Err(RevocationError::InvalidCredentialId(_))
    ));
    assert!(matches!(
        registry.register("", "did:key:zI", "did:key:zS"),
        Err(RevocationError::InvalidCredentialId(_))
    ));
    assert!(registry.is_empty());
}

#[test]
fn unknown_credential_is_not_found() {
    let registry = Registry::in_memory();
    assert!(matches!(
        registry.check_status("nope"),
        Err(RevocationError::EntryNotFound(_))
    ));
    assert!(matches!(
        registry.revoke("nope", "r"),
        Err(RevocationError::EntryNotFound(_))
    ));
}
