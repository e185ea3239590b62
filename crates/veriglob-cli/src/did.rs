//! # DID Subcommand
//!
//! - `generate`: a fresh Ed25519 key pair and its did:key document.
//! - `resolve`: rebuild the document of an existing did:key.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde_json::json;

use veriglob_crypto::Ed25519KeyPair;
use veriglob_did::{resolve_did_key, DidKey};

/// Arguments for the `veriglob did` subcommand.
#[derive(Args, Debug)]
pub struct DidArgs {
    #[command(subcommand)]
    pub command: DidCommand,
}

/// DID subcommands.
#[derive(Subcommand, Debug)]
pub enum DidCommand {
    /// Generate a new key pair and print its DID and document.
    Generate {
        /// Also print the hex secret, suitable for VERIGLOB_SIGNING_KEY.
        #[arg(long)]
        show_secret: bool,
    },

    /// Resolve a did:key to its public key and document.
    Resolve {
        /// The identifier to resolve.
        did: String,
    },
}

/// Execute the did subcommand.
pub fn run_did(args: &DidArgs) -> Result<u8> {
    match &args.command {
        DidCommand::Generate { show_secret } => cmd_generate(*show_secret),
        DidCommand::Resolve { did } => cmd_resolve(did),
    }
}

fn cmd_generate(show_secret: bool) -> Result<u8> {
    let keypair = Ed25519KeyPair::generate();
    let output = generate_report(&keypair, show_secret);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(0)
}

fn generate_report(keypair: &Ed25519KeyPair, show_secret: bool) -> serde_json::Value {
    let did = DidKey::from_keypair(keypair);
    let mut output = json!({
        "did": did.id(),
        "publicKey": did.public_key().to_hex(),
        "document": did.document(),
    });
    if show_secret {
        output["secretKey"] = json!(keypair.to_hex().as_str());
    }
    output
}

fn cmd_resolve(did: &str) -> Result<u8> {
    let resolved = resolve_did_key(did).with_context(|| format!("failed to resolve {did}"))?;
    let output = json!({
        "did": resolved.id(),
        "publicKey": resolved.public_key().to_hex(),
        "document": resolved.document(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(0)
}
