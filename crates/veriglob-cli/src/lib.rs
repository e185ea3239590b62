//! # veriglob-cli: Command-Line Interface for Veriglob
//!
//! Provides the `veriglob` binary. Every subcommand marshals its arguments
//! into calls on the library crates and prints the result; no protocol logic
//! lives here.
//!
//! ## Subcommands
//!
//! - `veriglob did generate|resolve`: key pairs and did:key documents.
//! - `veriglob issue`: sign a credential and record it in the registry.
//! - `veriglob revoke|status|list`: revocation registry management.
//! - `veriglob nonce`: a fresh presentation challenge.
//! - `veriglob present`: bundle credentials into a presentation.
//! - `veriglob verify credential|presentation`: check tokens and revocation.
//!
//! ```bash
//! veriglob did generate --show-secret
//! veriglob issue --subject did:key:z6Mk... --type identity --claims alice.yaml
//! veriglob verify credential --token v4.public... --issuer did:key:z6Mk...
//! ```
//!
//! ## Exit Codes
//!
//! `0` on success. `1` on any verification failure, on a revoked credential,
//! or on an operational error.

pub mod config;
pub mod did;
pub mod envelope;
pub mod issue;
pub mod present;
pub mod registry;
pub mod verify;

use std::path::Path;

use anyhow::{Context, Result};

/// Print `json` to stdout, or write it to `output` and say so.
pub fn emit_json(json: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Read a JSON or YAML document (chosen by file extension) as a JSON value.
pub fn read_structured_file(path: &Path) -> Result<serde_json::Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse YAML in {}", path.display()))
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON in {}", path.display()))
    }
}
