//! # CLI Workflow Test
//!
//! Runs the command handlers the `veriglob` binary dispatches to, sharing
//! one registry file and passing envelopes between steps through the
//! filesystem, the way three separate invocations would.

use std::path::PathBuf;

use veriglob_cli::config::CliConfig;
use veriglob_cli::envelope::{CredentialEnvelope, PresentationEnvelope};
use veriglob_cli::issue::{run_issue, IssueArgs};
use veriglob_cli::present::{build_presentation, PresentArgs};
use veriglob_cli::registry::{run_revoke, RevokeArgs};
use veriglob_cli::verify::{check_credential, check_presentation, RevocationSource};
use veriglob_crypto::Ed25519KeyPair;
use veriglob_did::{resolve, DidKey};
use veriglob_vc::CredentialType;

const VERIFIER: &str = "did:key:z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK";

fn read<T: serde::de::DeserializeOwned>(path: &PathBuf) -> T {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn issue_present_verify_revoke_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let registry_path = dir.path().join("revocation_registry.json");
    let issuer_config = CliConfig::default()
        .with_registry(Some(registry_path.clone()))
        .with_signing_key("11".repeat(32));

    let holder_key = Ed25519KeyPair::generate();
    let holder = DidKey::from_keypair(&holder_key);

    // Issuer: veriglob issue --subject <holder> --type employment --claims job.yaml
    let claims = dir.path().join("job.yaml");
    std::fs::write(
        &claims,
        "employerName: Acme Corp\njobTitle: Engineer\nstartDate: 2021-03-01\ncurrentEmployee: true\n",
    )
    .unwrap();
    let credential_file = dir.path().join("credential.json");
    let code = run_issue(
        &IssueArgs {
            subject: holder.id().to_string(),
            credential_type: CredentialType::Employment,
            claims,
            credential_id: None,
            output: Some(credential_file.clone()),
        },
        &issuer_config,
    )
    .unwrap();
    assert_eq!(code, 0);
    let credential: CredentialEnvelope = read(&credential_file);
    assert_eq!(credential.credential_type, "EmploymentCredential");

    // Holder: veriglob present --credential-file credential.json --audience <verifier>
    let presentation = build_presentation(
        &PresentArgs {
            credentials: Vec::new(),
            credential_files: vec![credential_file.clone()],
            audience: VERIFIER.to_string(),
            nonce: Some("verifier-challenge".to_string()),
            output: None,
        },
        &holder_key,
    )
    .unwrap();
    let presentation_file = dir.path().join("presentation.json");
    std::fs::write(
        &presentation_file,
        serde_json::to_string_pretty(&presentation).unwrap(),
    )
    .unwrap();
    let presentation: PresentationEnvelope = read(&presentation_file);
    assert_eq!(presentation.credentials, vec![credential.credential_id.clone()]);

    // Verifier: reads the same registry file.
    let verifier_config = CliConfig::default().with_registry(Some(registry_path.clone()));
    let holder_public = resolve(&presentation.holder.did).unwrap();
    let report = check_presentation(
        &presentation.presentation,
        &holder_public,
        VERIFIER,
        "verifier-challenge",
        &RevocationSource::open(&verifier_config, false),
    )
    .unwrap();
    assert!(report.is_accepted());
    let embedded = report.credentials[0].as_ref().unwrap();
    assert_eq!(embedded.claims.issuer, credential.issuer.did);
    assert_eq!(embedded.revocation.describe(), "active");

    // Issuer: veriglob revoke <id> --reason ...
    run_revoke(
        &RevokeArgs {
            credential_id: credential.credential_id.parse().unwrap(),
            reason: "contract ended".to_string(),
        },
        &issuer_config,
    )
    .unwrap();

    // Verifier again, with a fresh view of the registry.
    let source = RevocationSource::open(&verifier_config, false);
    let report = check_presentation(
        &presentation.presentation,
        &holder_public,
        VERIFIER,
        "verifier-challenge",
        &source,
    )
    .unwrap();
    assert!(!report.is_accepted());

    let issuer_key = resolve(&credential.issuer.did).unwrap();
    let direct = check_credential(&credential.token, &issuer_key, &source).unwrap();
    assert!(direct.revocation.is_revoked());

    // Skipping revocation accepts it again.
    let skipped =
        check_credential(&credential.token, &issuer_key, &RevocationSource::Skipped).unwrap();
    assert!(skipped.is_accepted());
}
