//! # veriglob CLI entry point
//!
//! Parses command-line arguments, resolves configuration, and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use veriglob_cli::config::CliConfig;
use veriglob_cli::did::{run_did, DidArgs};
use veriglob_cli::issue::{run_issue, IssueArgs};
use veriglob_cli::present::{run_nonce, run_present, PresentArgs};
use veriglob_cli::registry::{run_list, run_revoke, run_status, ListArgs, RevokeArgs, StatusArgs};
use veriglob_cli::verify::{run_verify, VerifyArgs};

/// Veriglob: decentralized identifiers, verifiable credentials, and
/// revocation.
///
/// Issues did:key identifiers, signs credentials and presentations as
/// v4.public tokens, verifies them, and manages the issuer's revocation
/// registry.
#[derive(Parser, Debug)]
#[command(name = "veriglob", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Revocation registry file. Overrides VERIGLOB_REGISTRY.
    #[arg(long, global = true)]
    registry: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate or resolve did:key identifiers.
    Did(DidArgs),

    /// Issue a credential and record it in the revocation registry.
    Issue(IssueArgs),

    /// Revoke a registered credential.
    Revoke(RevokeArgs),

    /// Show the registry entry for a credential.
    Status(StatusArgs),

    /// List registry entries, optionally by issuer or subject.
    List(ListArgs),

    /// Print a fresh presentation challenge.
    Nonce,

    /// Bundle credentials into a presentation for a verifier.
    Present(PresentArgs),

    /// Verify a credential or a presentation.
    Verify(VerifyArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = match CliConfig::from_env() {
        Ok(config) => config.with_registry(cli.registry),
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(1);
        }
    };
    tracing::debug!(?config, "resolved configuration");

    let result = match cli.command {
        Commands::Did(args) => run_did(&args),
        Commands::Issue(args) => run_issue(&args, &config),
        Commands::Revoke(args) => run_revoke(&args, &config),
        Commands::Status(args) => run_status(&args, &config),
        Commands::List(args) => run_list(&args, &config),
        Commands::Nonce => run_nonce(),
        Commands::Present(args) => run_present(&args, &config),
        Commands::Verify(args) => run_verify(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
