//! # Revocation Registry
//!
//! A map from credential id to [`RevocationEntry`] behind a
//! `parking_lot::RwLock`, optionally mirrored to a JSON file.
//!
//! ## Persistence
//!
//! After every mutation the complete map is written to a temporary file in
//! the same directory, synced, and renamed over the target; on Unix the
//! directory is synced after the rename. A crash mid-write leaves the
//! previous file intact. The write happens while the write lock is held. The
//! file is a JSON object keyed by credential id, sorted, and pretty-printed.
//!
//! Loading rejects a file whose keys disagree with their entries'
//! `credentialId`, whose ids would not be accepted by
//! [`CredentialId::new`], or whose entries contradict their status.

use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use veriglob_core::{CredentialId, Timestamp};

use crate::entry::RevocationEntry;
use crate::error::RevocationError;

/// A fresh globally unique credential id, `urn:uuid:<uuid-v4>`.
pub fn generate_credential_id() -> String {
    CredentialId::generate().into_string()
}

/// Issuer-side revocation registry.
#[derive(Debug, Default)]
pub struct Registry {
    entries: RwLock<HashMap<String, RevocationEntry>>,
    path: Option<PathBuf>,
}

impl Registry {
    /// An empty registry that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// A registry mirrored to `path`.
    ///
    /// Loads existing entries if the file exists. A missing or empty file
    /// yields an empty registry; the file is created on the first mutation.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, RevocationError> {
        let path = path.into();
        let entries = load(&path)?;
        tracing::debug!(path = %path.display(), entries = entries.len(), "opened revocation registry");
        Ok(Self {
            entries: RwLock::new(entries),
            path: Some(path),
        })
    }

    /// The backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Record a newly issued credential as Active.
    ///
    /// The id must pass [`CredentialId::new`]. An existing entry with the
    /// same id is replaced.
    pub fn register(
        &self,
        credential_id: &str,
        issuer_did: &str,
        subject_did: &str,
    ) -> Result<(), RevocationError> {
        let id = CredentialId::new(credential_id)?;
        let entry = RevocationEntry::new(id.as_str(), issuer_did, subject_did, Timestamp::now());
        let mut entries = self.entries.write();
        if let Some(previous) = entries.insert(id.into_string(), entry) {
            tracing::warn!(
                credential_id,
                previous_issuer = %previous.issuer_did,
                previous_status = %previous.status,
                "credential id re-registered; previous entry replaced"
            );
        }
        tracing::info!(credential_id, issuer = %issuer_did, subject = %subject_did, "registered credential");
        self.persist(&entries)
    }

    /// Revoke an Active credential.
    pub fn revoke(&self, credential_id: &str, reason: &str) -> Result<(), RevocationError> {
        let id = CredentialId::new(credential_id)?;
        let mut entries = self.entries.write();
        let entry = entries
            .get_mut(id.as_str())
            .ok_or_else(|| RevocationError::EntryNotFound(id.into_string()))?;
        entry.revoke(reason, Timestamp::now())?;
        tracing::info!(credential_id, reason, "revoked credential");
        self.persist(&entries)
    }

    /// A copy of the entry for `credential_id`. Ids that could never have
    /// been registered are simply not found.
    pub fn check_status(&self, credential_id: &str) -> Result<RevocationEntry, RevocationError> {
        self.entries
            .read()
            .get(credential_id)
            .cloned()
            .ok_or_else(|| RevocationError::EntryNotFound(credential_id.to_string()))
    }

    pub fn is_revoked(&self, credential_id: &str) -> Result<bool, RevocationError> {
        self.check_status(credential_id).map(|e| e.is_revoked())
    }

    /// Entries issued by `issuer_did`, in no particular order.
    pub fn list_by_issuer(&self, issuer_did: &str) -> Vec<RevocationEntry> {
        self.filter(|e| e.issuer_did == issuer_did)
    }

    /// Entries about `subject_did`, in no particular order.
    pub fn list_by_subject(&self, subject_did: &str) -> Vec<RevocationEntry> {
        self.filter(|e| e.subject_did == subject_did)
    }

    /// Snapshot of every entry, in no particular order.
    pub fn entries(&self) -> Vec<RevocationEntry> {
        self.filter(|_| true)
    }

    /// All entries as pretty-printed JSON keyed by credential id; the same
    /// format as the backing file.
    pub fn export(&self) -> Result<Vec<u8>, RevocationError> {
        Ok(encode(&self.entries.read())?)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn filter(&self, pred: impl Fn(&RevocationEntry) -> bool) -> Vec<RevocationEntry> {
        self.entries
            .read()
            .values()
            .filter(|e| pred(e))
            .cloned()
            .collect()
    }

    fn persist(&self, entries: &HashMap<String, RevocationEntry>) -> Result<(), RevocationError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let bytes = encode(entries)?;
        write_atomic(path, &bytes).map_err(|source| {
            tracing::error!(path = %path.display(), error = %source, "failed to persist revocation registry");
            RevocationError::Persistence {
                path: path.clone(),
                source,
            }
        })?;
        tracing::debug!(path = %path.display(), entries = entries.len(), "persisted revocation registry");
        Ok(())
    }
}

fn encode(entries: &HashMap<String, RevocationEntry>) -> serde_json::Result<Vec<u8>> {
    let sorted: BTreeMap<&String, &RevocationEntry> = entries.iter().collect();
    serde_json::to_vec_pretty(&sorted)
}

fn load(path: &Path) -> Result<HashMap<String, RevocationEntry>, RevocationError> {
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
        Err(source) => {
            return Err(RevocationError::Persistence {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    if data.iter().all(u8::is_ascii_whitespace) {
        return Ok(HashMap::new());
    }
    let corrupt = |reason: String| RevocationError::CorruptRegistry {
        path: path.to_path_buf(),
        reason,
    };
    let mut entries: HashMap<String, RevocationEntry> =
        serde_json::from_slice(&data).map_err(|e| corrupt(e.to_string()))?;
    for (key, entry) in entries.iter_mut() {
        CredentialId::new(key.as_str()).map_err(|e| corrupt(e.to_string()))?;
        if entry.credential_id != *key {
            return Err(corrupt(format!(
                "entry {:?} is stored under key {key:?}",
                entry.credential_id
            )));
        }
        entry.normalize().map_err(corrupt)?;
    }
    Ok(entries)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    #[cfg(unix)]
    std::fs::File::open(dir)?.sync_all()?;
    Ok(())
}
