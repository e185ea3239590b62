//! # Registry Subcommands
//!
//! `revoke`, `status`, and `list` operate on the revocation registry file
//! named by `--registry` or `VERIGLOB_REGISTRY`.

use anyhow::{Context, Result};
use clap::Args;

use veriglob_core::CredentialId;
use veriglob_revocation::{Registry, RevocationEntry};

use crate::config::CliConfig;

/// Arguments for `veriglob revoke`.
#[derive(Args, Debug)]
pub struct RevokeArgs {
    /// Credential id to revoke.
    pub credential_id: CredentialId,

    /// Reason recorded with the revocation.
    #[arg(long, default_value = "")]
    pub reason: String,
}

/// Arguments for `veriglob status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Credential id to look up.
    pub credential_id: String,
}

/// Arguments for `veriglob list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only entries issued by this DID.
    #[arg(long, conflicts_with = "subject")]
    pub issuer: Option<String>,

    /// Only entries about this DID.
    #[arg(long)]
    pub subject: Option<String>,
}

fn open_registry(config: &CliConfig) -> Result<Registry> {
    Registry::open(&config.registry_path).with_context(|| {
        format!(
            "failed to open revocation registry {}",
            config.registry_path.display()
        )
    })
}

/// Execute the revoke subcommand.
pub fn run_revoke(args: &RevokeArgs, config: &CliConfig) -> Result<u8> {
    let registry = open_registry(config)?;
    registry
        .revoke(args.credential_id.as_str(), &args.reason)
        .with_context(|| format!("failed to revoke {}", args.credential_id))?;
    println!("OK: revoked {}", args.credential_id);
    Ok(0)
}

/// Execute the status subcommand.
pub fn run_status(args: &StatusArgs, config: &CliConfig) -> Result<u8> {
    let registry = open_registry(config)?;
    let entry = registry
        .check_status(&args.credential_id)
        .with_context(|| format!("no status for {}", args.credential_id))?;
    println!("{}", serde_json::to_string_pretty(&entry)?);
    Ok(0)
}

/// Execute the list subcommand.
pub fn run_list(args: &ListArgs, config: &CliConfig) -> Result<u8> {
    let registry = open_registry(config)?;
    let entries = select(&registry, args);
    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(0)
}

/// Entries matching the filter, ordered by issuance time then id.
fn select(registry: &Registry, args: &ListArgs) -> Vec<RevocationEntry> {
    let mut entries = match (&args.issuer, &args.subject) {
        (Some(issuer), _) => registry.list_by_issuer(issuer),
        (None, Some(subject)) => registry.list_by_subject(subject),
        (None, None) => registry.entries(),
    };
    entries.sort_by(|a, b| {
        a.issued_at
            .cmp(&b.issued_at)
            .then_with(|| a.credential_id.cmp(&b.credential_id))
    });
    entries
}
