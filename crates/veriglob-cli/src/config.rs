//! CLI configuration.
//!
//! Settings resolve from command-line flags first, then environment
//! variables, then defaults. Libraries never read the environment; the CLI
//! passes everything down as explicit arguments.

use std::path::PathBuf;

use veriglob_crypto::Ed25519KeyPair;

/// Registry file used when neither `--registry` nor `VERIGLOB_REGISTRY` is set.
pub const DEFAULT_REGISTRY_PATH: &str = "revocation_registry.json";

pub const ENV_REGISTRY: &str = "VERIGLOB_REGISTRY";
pub const ENV_SIGNING_KEY: &str = "VERIGLOB_SIGNING_KEY";

/// Resolved CLI settings.
///
/// Custom `Debug` implementation redacts the signing key.
#[derive(Clone)]
pub struct CliConfig {
    /// Revocation registry file.
    pub registry_path: PathBuf,
    /// Hex-encoded Ed25519 secret: a 32-byte seed or 64-byte seed‖public key.
    signing_key: Option<String>,
}

impl std::fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliConfig")
            .field("registry_path", &self.registry_path)
            .field(
                "signing_key",
                &self.signing_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            registry_path: PathBuf::from(DEFAULT_REGISTRY_PATH),
            signing_key: None,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `VERIGLOB_REGISTRY` (default: `revocation_registry.json`)
    /// - `VERIGLOB_SIGNING_KEY` (required by `issue` and `present` only)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let registry_path = match lookup(ENV_REGISTRY) {
            Some(raw) if raw.trim().is_empty() => {
                return Err(ConfigError::InvalidValue {
                    var: ENV_REGISTRY.to_string(),
                    reason: "must not be empty".to_string(),
                })
            }
            Some(raw) => PathBuf::from(raw),
            None => PathBuf::from(DEFAULT_REGISTRY_PATH),
        };
        let signing_key = lookup(ENV_SIGNING_KEY)
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty());

        Ok(Self {
            registry_path,
            signing_key,
        })
    }

    /// Apply a `--registry` flag over the environment value.
    pub fn with_registry(mut self, registry: Option<PathBuf>) -> Self {
        if let Some(path) = registry {
            self.registry_path = path;
        }
        self
    }

    pub fn with_signing_key(mut self, hex: impl Into<String>) -> Self {
        self.signing_key = Some(hex.into());
        self
    }

    /// The configured signing key. Commands that sign fail without one.
    pub fn signing_keypair(&self) -> Result<Ed25519KeyPair, ConfigError> {
        let hex = self
            .signing_key
            .as_deref()
            .ok_or(ConfigError::MissingSigningKey)?;
        Ed25519KeyPair::from_hex(hex).map_err(|e| ConfigError::InvalidSigningKey(e.to_string()))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
    #[error("{ENV_SIGNING_KEY} is not a valid Ed25519 secret: {0}")]
    InvalidSigningKey(String),
    #[error("{ENV_SIGNING_KEY} must be set to sign; see `veriglob did generate --show-secret`")]
    MissingSigningKey,
}
