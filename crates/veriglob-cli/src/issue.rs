//! # Issue Subcommand
//!
//! Signs a credential for a subject, records it as Active in the
//! revocation registry, and prints the credential envelope.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use veriglob_core::CredentialId;
use veriglob_crypto::Ed25519KeyPair;
use veriglob_did::DidKey;
use veriglob_revocation::Registry;
use veriglob_vc::{issue_credential, CredentialSubject, CredentialType};

use crate::config::CliConfig;
use crate::envelope::{CredentialEnvelope, KeyedParty, Party};
use crate::{emit_json, read_structured_file};

/// Arguments for the `veriglob issue` subcommand.
#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Subject DID the credential is about.
    #[arg(long)]
    pub subject: String,

    /// Credential type: identity, education, employment, membership, or a
    /// full tag such as `IdentityCredential`.
    #[arg(long = "type")]
    pub credential_type: CredentialType,

    /// Subject claims as a JSON or YAML object. `id` defaults to the
    /// subject DID.
    #[arg(long)]
    pub claims: PathBuf,

    /// Credential id to embed: non-empty, no whitespace. Generated when
    /// omitted.
    #[arg(long)]
    pub credential_id: Option<CredentialId>,

    /// Write the envelope here instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Execute the issue subcommand.
pub fn run_issue(args: &IssueArgs, config: &CliConfig) -> Result<u8> {
    let keypair = config.signing_keypair()?;
    let registry = Registry::open(&config.registry_path).with_context(|| {
        format!(
            "failed to open revocation registry {}",
            config.registry_path.display()
        )
    })?;

    let envelope = issue_and_register(args, &keypair, &registry)?;
    emit_json(&serde_json::to_string_pretty(&envelope)?, args.output.as_deref())?;
    Ok(0)
}

/// Build the subject, sign the credential, and register it.
pub fn issue_and_register(
    args: &IssueArgs,
    keypair: &Ed25519KeyPair,
    registry: &Registry,
) -> Result<CredentialEnvelope> {
    let issuer = DidKey::from_keypair(keypair);
    let subject = load_subject(args)?;

    let credential_id = args
        .credential_id
        .clone()
        .unwrap_or_else(CredentialId::generate)
        .into_string();

    let token = issue_credential(
        issuer.id(),
        &args.subject,
        keypair,
        &subject,
        Some(&credential_id),
    )
    .context("failed to issue credential")?;

    registry
        .register(&credential_id, issuer.id(), &args.subject)
        .context("failed to register credential")?;

    Ok(CredentialEnvelope {
        credential_id,
        issuer: KeyedParty {
            did: issuer.id().to_string(),
            public_key: issuer.public_key().to_hex(),
        },
        subject: Party {
            did: args.subject.clone(),
        },
        credential_type: subject.tag().to_string(),
        token,
    })
}

fn load_subject(args: &IssueArgs) -> Result<CredentialSubject> {
    let mut claims = read_structured_file(&args.claims)?;
    let Some(object) = claims.as_object_mut() else {
        bail!("claims in {} must be an object", args.claims.display());
    };
    match object.get("id").and_then(|v| v.as_str()) {
        None => {
            object.insert("id".to_string(), args.subject.clone().into());
        }
        Some(id) if id != args.subject => {
            bail!("claims id {id:?} does not match --subject {:?}", args.subject);
        }
        Some(_) => {}
    }
    CredentialSubject::from_value(args.credential_type, claims)
        .with_context(|| format!("invalid claims in {}", args.claims.display()))
}
