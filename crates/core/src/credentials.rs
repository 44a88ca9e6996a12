// Sim Session Manager - Credential Store Module
// File-backed username -> password mapping

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use sim_session_common::{Error, Result};

/// Durable mapping from username to password, backed by a flat JSON file.
///
/// The whole mapping is loaded into memory per operation and written back
/// in full on every mutation. Passwords are stored in clear text; the file
/// is restricted to the owning user on Unix. Writes are plain overwrites,
/// not atomic renames.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check whether the backing file is present
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Create the backing file with an empty mapping
    pub fn initialize_empty(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Storage(format!(
                    "failed to create {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        // Compact on creation; pretty-printed on every later save
        fs::write(&self.path, "{}").map_err(|e| {
            Error::Storage(format!("failed to create {}: {}", self.path.display(), e))
        })?;

        restrict_permissions(&self.path)?;

        debug!("Created empty credential store at {}", self.path.display());
        Ok(())
    }

    /// Load the full mapping from the backing file
    ///
    /// Fails if the file is missing or its content is not a string->string
    /// JSON object. Malformed persisted state is never silently repaired.
    pub fn load(&self) -> Result<BTreeMap<String, String>> {
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            Error::Storage(format!("failed to read {}: {}", self.path.display(), e))
        })?;

        let users: BTreeMap<String, String> = serde_json::from_str(&contents).map_err(|e| {
            Error::Storage(format!("failed to parse {}: {}", self.path.display(), e))
        })?;

        debug!(
            "Loaded {} user(s) from {}",
            users.len(),
            self.path.display()
        );
        Ok(users)
    }

    /// Overwrite the backing file with the given mapping
    pub fn save(&self, users: &BTreeMap<String, String>) -> Result<()> {
        // 4-space indentation, matching the file format of the source system
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        users.serialize(&mut serializer).map_err(|e| {
            Error::Storage(format!("failed to serialize credential map: {}", e))
        })?;

        fs::write(&self.path, buf).map_err(|e| {
            Error::Storage(format!("failed to write {}: {}", self.path.display(), e))
        })?;

        restrict_permissions(&self.path)?;

        debug!("Saved {} user(s) to {}", users.len(), self.path.display());
        Ok(())
    }
}

/// Set restrictive permissions on the credential file (Unix only)
fn restrict_permissions(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = fs::Permissions::from_mode(0o600);
        fs::set_permissions(path, permissions).map_err(|e| {
            Error::Storage(format!(
                "failed to set permissions on {}: {}",
                path.display(),
                e
            ))
        })?;
    }

    #[cfg(not(unix))]
    let _ = path;

    Ok(())
}
