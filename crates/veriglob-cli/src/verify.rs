//! # Verify Subcommand
//!
//! - `credential`: check a credential token's signature, structure, and
//!   expiry against the issuer key, then its revocation status.
//! - `presentation`: check a presentation against the holder key, audience,
//!   and nonce, then each embedded credential against the key of the issuer
//!   it names.
//!
//! Exits `1` on any failure or revoked credential. A registry that cannot
//! be loaded is reported but does not fail verification.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};

use veriglob_crypto::Ed25519PublicKey;
use veriglob_did::resolve;
use veriglob_revocation::{Registry, RevocationError, RevocationStatus};
use veriglob_vc::{
    peek_credential_issuer, verify_credential, verify_presentation, CredentialClaims,
    PresentationClaims,
};

use crate::config::CliConfig;
use crate::envelope::{CredentialEnvelope, PresentationEnvelope};

const RULE_WIDTH: usize = 50;

/// Arguments for the `veriglob verify` subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    #[command(subcommand)]
    pub command: VerifyCommand,
}

/// Verify subcommands.
#[derive(Subcommand, Debug)]
pub enum VerifyCommand {
    /// Verify a credential token.
    Credential(CredentialCheckArgs),
    /// Verify a presentation token and every credential inside it.
    Presentation(PresentationCheckArgs),
}

#[derive(Args, Debug)]
pub struct CredentialCheckArgs {
    /// Credential token.
    #[arg(long, required_unless_present = "input", conflicts_with = "input")]
    pub token: Option<String>,

    /// Credential envelope written by `veriglob issue`.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Issuer DID; its public key is resolved from the identifier.
    #[arg(long, conflicts_with = "public_key")]
    pub issuer: Option<String>,

    /// Issuer public key, hex encoded.
    #[arg(long)]
    pub public_key: Option<String>,

    /// Do not consult the revocation registry.
    #[arg(long)]
    pub skip_revocation: bool,
}

#[derive(Args, Debug)]
pub struct PresentationCheckArgs {
    /// Presentation token.
    #[arg(long, required_unless_present = "input", conflicts_with = "input")]
    pub token: Option<String>,

    /// Presentation envelope written by `veriglob present`.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Holder DID. Defaults to the envelope's holder.
    #[arg(long)]
    pub holder: Option<String>,

    /// Expected audience. Defaults to the envelope's audience; empty skips
    /// the check.
    #[arg(long)]
    pub audience: Option<String>,

    /// Expected nonce. Defaults to the envelope's nonce; empty skips the
    /// check.
    #[arg(long)]
    pub nonce: Option<String>,

    /// Do not consult the revocation registry.
    #[arg(long)]
    pub skip_revocation: bool,
}

/// Execute the verify subcommand.
pub fn run_verify(args: &VerifyArgs, config: &CliConfig) -> Result<u8> {
    match &args.command {
        VerifyCommand::Credential(check) => cmd_credential(check, config),
        VerifyCommand::Presentation(check) => cmd_presentation(check, config),
    }
}

// ─── Revocation Lookup ──────────────────────────────────────────────

/// Where revocation status comes from for one verification run.
#[derive(Debug)]
pub enum RevocationSource {
    Skipped,
    Unavailable(String),
    Registry(Registry),
}

impl RevocationSource {
    pub fn open(config: &CliConfig, skip: bool) -> Self {
        if skip {
            return Self::Skipped;
        }
        match Registry::open(&config.registry_path) {
            Ok(registry) => Self::Registry(registry),
            Err(e) => {
                tracing::warn!(path = %config.registry_path.display(), error = %e, "revocation registry unavailable");
                Self::Unavailable(e.to_string())
            }
        }
    }

    pub fn check(&self, claims: &CredentialClaims) -> RevocationCheck {
        let registry = match self {
            Self::Skipped => return RevocationCheck::Skipped,
            Self::Unavailable(reason) => return RevocationCheck::Unavailable(reason.clone()),
            Self::Registry(registry) => registry,
        };
        let Some(id) = claims.credential_id() else {
            return RevocationCheck::NotTracked;
        };
        match registry.check_status(id) {
            Ok(entry) => RevocationCheck::Status(entry.status),
            Err(RevocationError::EntryNotFound(_)) => RevocationCheck::NotInRegistry,
            Err(e) => RevocationCheck::Unavailable(e.to_string()),
        }
    }
}

/// Outcome of the revocation lookup for one credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevocationCheck {
    Skipped,
    Unavailable(String),
    /// The credential carries no id.
    NotTracked,
    NotInRegistry,
    Status(RevocationStatus),
}

impl RevocationCheck {
    pub fn is_revoked(&self) -> bool {
        matches!(self, Self::Status(RevocationStatus::Revoked))
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Skipped => "not checked".to_string(),
            Self::Unavailable(reason) => format!("unknown (registry unavailable: {reason})"),
            Self::NotTracked => "not tracked".to_string(),
            Self::NotInRegistry => "not in registry".to_string(),
            Self::Status(status) => status.to_string(),
        }
    }
}

// ─── Credential ─────────────────────────────────────────────────────

/// A credential that passed cryptographic verification.
#[derive(Debug)]
pub struct CredentialReport {
    pub claims: CredentialClaims,
    pub revocation: RevocationCheck,
}

impl CredentialReport {
    pub fn is_accepted(&self) -> bool {
        !self.revocation.is_revoked()
    }
}

/// Verify `token` against `issuer_key` and look up its revocation status.
pub fn check_credential(
    token: &str,
    issuer_key: &Ed25519PublicKey,
    revocation: &RevocationSource,
) -> Result<CredentialReport> {
    let claims = verify_credential(token, issuer_key)?;
    let revocation = revocation.check(&claims);
    Ok(CredentialReport { claims, revocation })
}

/// Verify an embedded credential against the did:key it claims as issuer.
pub fn check_embedded_credential(
    token: &str,
    revocation: &RevocationSource,
) -> Result<CredentialReport> {
    let issuer = peek_credential_issuer(token)?;
    let issuer_key =
        resolve(&issuer).with_context(|| format!("cannot resolve issuer {issuer}"))?;
    check_credential(token, &issuer_key, revocation)
}

fn cmd_credential(args: &CredentialCheckArgs, config: &CliConfig) -> Result<u8> {
    let (token, issuer_key) = credential_inputs(args)?;
    let revocation = RevocationSource::open(config, args.skip_revocation);

    match check_credential(&token, &issuer_key, &revocation) {
        Ok(report) => {
            if report.is_accepted() {
                println!("✅ VERIFICATION SUCCESSFUL");
            } else {
                println!("❌ CREDENTIAL REVOKED");
            }
            print_credential(&report, "")?;
            Ok(if report.is_accepted() { 0 } else { 1 })
        }
        Err(e) => {
            println!("❌ VERIFICATION FAILED");
            println!("Error: {e:#}");
            Ok(1)
        }
    }
}

/// The token and issuer key to verify it with.
///
/// Explicit flags win over envelope values. In an envelope the issuer DID is
/// preferred; the hex key is the fallback.
fn credential_inputs(args: &CredentialCheckArgs) -> Result<(String, Ed25519PublicKey)> {
    let envelope = args
        .input
        .as_deref()
        .map(read_envelope::<CredentialEnvelope>)
        .transpose()?;

    let token = match (&args.token, &envelope) {
        (Some(token), _) => token.clone(),
        (None, Some(env)) => env.token.clone(),
        (None, None) => bail!("either --token or --input is required"),
    };

    let key = if let Some(did) = &args.issuer {
        resolve(did).with_context(|| format!("failed to resolve issuer {did}"))?
    } else if let Some(hex) = &args.public_key {
        Ed25519PublicKey::from_hex(hex).context("invalid --public-key")?
    } else if let Some(env) = &envelope {
        key_from_party(&env.issuer.did, &env.issuer.public_key)
            .context("credential envelope has no usable issuer key")?
    } else {
        bail!("one of --issuer or --public-key is required with --token");
    };
    Ok((token, key))
}

// ─── Presentation ───────────────────────────────────────────────────

/// A presentation that passed verification, and the outcome for each
/// embedded credential in order.
#[derive(Debug)]
pub struct PresentationReport {
    pub claims: PresentationClaims,
    pub credentials: Vec<Result<CredentialReport>>,
}

impl PresentationReport {
    pub fn is_accepted(&self) -> bool {
        self.credentials
            .iter()
            .all(|c| c.as_ref().map(CredentialReport::is_accepted).unwrap_or(false))
    }
}

/// Verify a presentation, then every credential inside it.
pub fn check_presentation(
    token: &str,
    holder_key: &Ed25519PublicKey,
    audience: &str,
    nonce: &str,
    revocation: &RevocationSource,
) -> Result<PresentationReport> {
    let claims = verify_presentation(token, holder_key, audience, nonce)?;
    let credentials = claims
        .credentials()
        .iter()
        .map(|credential| check_embedded_credential(credential, revocation))
        .collect();
    Ok(PresentationReport {
        claims,
        credentials,
    })
}

struct PresentationInputs {
    token: String,
    holder_key: Ed25519PublicKey,
    audience: String,
    nonce: String,
}

fn presentation_inputs(args: &PresentationCheckArgs) -> Result<PresentationInputs> {
    let envelope = args
        .input
        .as_deref()
        .map(read_envelope::<PresentationEnvelope>)
        .transpose()?
        .unwrap_or_default();

    let token = match &args.token {
        Some(token) => token.clone(),
        None if !envelope.presentation.is_empty() => envelope.presentation.clone(),
        None => bail!("either --token or --input is required"),
    };

    let holder_key = match &args.holder {
        Some(did) => resolve(did).with_context(|| format!("failed to resolve holder {did}"))?,
        None => key_from_party(&envelope.holder.did, &envelope.holder.public_key)
            .context("--holder is required unless the envelope names the holder")?,
    };

    Ok(PresentationInputs {
        token,
        holder_key,
        audience: args.audience.clone().unwrap_or(envelope.audience),
        nonce: args.nonce.clone().unwrap_or(envelope.nonce),
    })
}

fn cmd_presentation(args: &PresentationCheckArgs, config: &CliConfig) -> Result<u8> {
    let inputs = presentation_inputs(args)?;
    let revocation = RevocationSource::open(config, args.skip_revocation);

    let report = match check_presentation(
        &inputs.token,
        &inputs.holder_key,
        &inputs.audience,
        &inputs.nonce,
        &revocation,
    ) {
        Ok(report) => report,
        Err(e) => {
            println!("❌ PRESENTATION VERIFICATION FAILED");
            println!("Error: {e:#}");
            return Ok(1);
        }
    };

    let claims = &report.claims;
    println!("✅ PRESENTATION VERIFIED");
    println!("{}", rule());
    println!("Presentation ID: {}", claims.presentation.id);
    println!("Holder:          {}", claims.holder());
    println!("Audience:        {}", claims.audience);
    println!("Nonce:           {}", claims.nonce);
    println!("Issued At:       {}", claims.issued_at);
    println!("Expires At:      {}", claims.expires_at);
    println!("Credentials:     {}", claims.credentials().len());
    println!("{}", rule());

    for (i, outcome) in report.credentials.iter().enumerate() {
        println!();
        println!("[Credential {}]", i + 1);
        match outcome {
            Ok(credential) => {
                if credential.is_accepted() {
                    println!("  ✅ verified");
                } else {
                    println!("  ❌ revoked");
                }
                if credential.claims.subject != claims.holder() {
                    println!("  ⚠️  subject {} is not the holder", credential.claims.subject);
                }
                print_credential(credential, "  ")?;
            }
            Err(e) => {
                println!("  ❌ verification failed");
                println!("  Error: {e:#}");
            }
        }
    }

    Ok(if report.is_accepted() { 0 } else { 1 })
}

// ─── Helpers ────────────────────────────────────────────────────────

fn read_envelope<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

/// A key from a DID, or failing that from hex.
fn key_from_party(did: &str, public_key_hex: &str) -> Result<Ed25519PublicKey> {
    if !did.is_empty() {
        match resolve(did) {
            Ok(key) => return Ok(key),
            Err(e) => tracing::debug!(did, error = %e, "falling back to hex public key"),
        }
    }
    if public_key_hex.is_empty() {
        bail!("neither a resolvable DID nor a public key is present");
    }
    Ok(Ed25519PublicKey::from_hex(public_key_hex)?)
}

fn rule() -> String {
    "─".repeat(RULE_WIDTH)
}

fn print_credential(report: &CredentialReport, indent: &str) -> Result<()> {
    let claims = &report.claims;
    if let Some(id) = claims.credential_id() {
        println!("{indent}Credential ID: {id}");
    }
    println!("{indent}Issuer:        {}", claims.issuer);
    println!("{indent}Subject:       {}", claims.subject);
    println!("{indent}Issued At:     {}", claims.issued_at);
    println!("{indent}Expires At:    {}", claims.expires_at);
    println!("{indent}Status:        {}", report.revocation.describe());
    println!("{indent}Credential Types:");
    for t in &claims.credential.types {
        println!("{indent}  • {t}");
    }
    println!("{indent}Credential Subject:");
    let subject = serde_json::to_string_pretty(claims.credential_subject())?;
    for line in subject.lines() {
        println!("{indent}  {line}");
    }
    Ok(())
}
