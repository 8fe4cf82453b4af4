//! Session persistence.
//!
//! Stores the signed-in session in `<base>/session.json` with restricted
//! permissions (0600). Tokens are never logged or displayed in full.
//!
//! The store is deliberately injectable (constructed with an explicit
//! path) rather than a process-global: everything that reads or writes
//! the session receives a `SessionStore` by reference.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use atlas_types::Role;

use crate::config::paths;

/// Bearer token pair issued by the backend at login.
///
/// Both tokens are opaque strings; expiry is owned by the issuer and
/// discovered only through a 401 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// The access token attached to authenticated requests.
    pub access: String,
    /// The refresh token (unused by this client, kept for the backend's
    /// renewal flow).
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Display identity of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
    /// Role as reported by the login response; None when the backend
    /// does not include one.
    #[serde(default)]
    pub role: Option<Role>,
}

/// The persisted pairing of credential and identity.
///
/// Written and cleared as a unit: a session is either fully present or
/// fully absent, never partial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub credential: Credential,
    pub identity: Identity,
}

/// File-backed session store.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Creates a store backed by the given file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Creates a store at the default `$ATLAS_HOME/session.json` location.
    pub fn open_default() -> Self {
        Self::new(paths::session_path())
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Writes the session, overwriting any prior one.
    ///
    /// The whole file is replaced in one write so no reader can observe
    /// a credential without its identity.
    ///
    /// # Errors
    /// Returns an error if serialization or the file write fails.
    pub fn set(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(session).context("Failed to serialize session")?;

        // Write with restricted permissions
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }

    /// Returns the stored session, or None if never set or cleared.
    ///
    /// A file that does not parse as a full session counts as absent.
    pub fn get(&self) -> Option<Session> {
        let contents = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Removes the session file. Idempotent.
    ///
    /// # Errors
    /// Returns an error only if an existing file cannot be removed.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", self.path.display())),
        }
    }
}

/// Returns a masked version of a token for display (first 12 chars + ...).
pub fn mask_token(token: &str) -> String {
    if token.len() <= 16 {
        return "***".to_string();
    }
    let prefix: String = token.chars().take(12).collect();
    format!("{prefix}...")
}
