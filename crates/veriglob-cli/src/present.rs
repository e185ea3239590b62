//! # Present and Nonce Subcommands
//!
//! `present` bundles credential tokens into a presentation signed by the
//! holder key; `nonce` prints a fresh challenge for a verifier to hand out.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use veriglob_crypto::Ed25519KeyPair;
use veriglob_did::DidKey;
use veriglob_vc::{generate_nonce, present, verify_presentation};

use crate::config::CliConfig;
use crate::envelope::{CredentialEnvelope, KeyedParty, PresentationEnvelope};
use crate::emit_json;

/// Arguments for the `veriglob present` subcommand.
#[derive(Args, Debug)]
pub struct PresentArgs {
    /// Credential token to include. Repeatable.
    #[arg(long = "credential")]
    pub credentials: Vec<String>,

    /// Credential envelope written by `veriglob issue`. Repeatable.
    #[arg(long = "credential-file")]
    pub credential_files: Vec<PathBuf>,

    /// Verifier DID the presentation is meant for.
    #[arg(long)]
    pub audience: String,

    /// Challenge nonce from the verifier. Generated when omitted.
    #[arg(long)]
    pub nonce: Option<String>,

    /// Write the envelope here instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Execute the present subcommand.
pub fn run_present(args: &PresentArgs, config: &CliConfig) -> Result<u8> {
    let keypair = config.signing_keypair()?;
    let envelope = build_presentation(args, &keypair)?;
    emit_json(&serde_json::to_string_pretty(&envelope)?, args.output.as_deref())?;
    Ok(0)
}

/// Execute the nonce subcommand.
pub fn run_nonce() -> Result<u8> {
    println!("{}", generate_nonce());
    Ok(0)
}

/// Collect the credentials and sign the presentation.
pub fn build_presentation(
    args: &PresentArgs,
    keypair: &Ed25519KeyPair,
) -> Result<PresentationEnvelope> {
    let holder = DidKey::from_keypair(keypair);

    let mut tokens = args.credentials.clone();
    let mut credential_ids = Vec::new();
    for path in &args.credential_files {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let envelope: CredentialEnvelope = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse credential envelope {}", path.display()))?;
        if !envelope.credential_id.is_empty() {
            credential_ids.push(envelope.credential_id);
        }
        tokens.push(envelope.token);
    }
    if tokens.is_empty() {
        bail!("at least one --credential or --credential-file is required");
    }

    let nonce = args.nonce.clone().unwrap_or_default();
    let token = present(holder.id(), keypair, &tokens, &args.audience, &nonce)
        .context("failed to create presentation")?;

    // Read the nonce back so a generated one is reported.
    let claims = verify_presentation(&token, &keypair.public_key(), "", "")
        .context("freshly signed presentation failed to verify")?;

    Ok(PresentationEnvelope {
        holder: KeyedParty {
            did: holder.id().to_string(),
            public_key: holder.public_key().to_hex(),
        },
        audience: args.audience.clone(),
        nonce: claims.nonce,
        credentials: credential_ids,
        presentation: token,
    })
}
