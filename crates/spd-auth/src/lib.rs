//! Login roles and the on-disk session flag store.
//!
//! Credential checking sits behind the [`Authenticator`] trait so the
//! credential source is swappable; this crate ships no credentials of its
//! own. The session store persists two flags per login, `userRole` and
//! `lastLogin`, under those exact key names; downstream tooling reads the
//! file by key, so the names are part of the contract.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum AuthError {
    /// The supplied credentials did not match any entry. Deliberately carries
    /// no hint about whether the username or the password was wrong.
    Rejected,
    /// The session or credentials file could not be read, written or parsed.
    Store(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Rejected => write!(f, "invalid username or password"),
            AuthError::Store(msg) => write!(f, "store error: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

// ---------------------------------------------------------------------------
// Roles and credentials
// ---------------------------------------------------------------------------

/// The role recorded against every order row a login produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Manager,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "Manager",
            Role::User => "User",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// ---------------------------------------------------------------------------
// Authenticator
// ---------------------------------------------------------------------------

/// Credential checking contract.
pub trait Authenticator: Send + Sync {
    /// Resolve credentials to a role, or [`AuthError::Rejected`].
    fn authenticate(&self, credentials: &Credentials) -> Result<Role, AuthError>;
}

/// One username/password/role triple of a [`StaticCredentialTable`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialEntry {
    pub username: String,
    pub password: String,
    pub role: Role,
}

/// Fixed in-memory credential table supplied by the caller, typically loaded
/// from a JSON file outside the repository.
#[derive(Debug, Clone)]
pub struct StaticCredentialTable {
    entries: Vec<CredentialEntry>,
}

impl StaticCredentialTable {
    pub fn new(entries: Vec<CredentialEntry>) -> Self {
        Self { entries }
    }

    /// Load a JSON array of entries from `path`.
    pub fn load(path: &Path) -> Result<Self, AuthError> {
        let text = fs::read_to_string(path).map_err(|e| {
            AuthError::Store(format!("credentials file {}: {e}", path.display()))
        })?;
        let entries: Vec<CredentialEntry> = serde_json::from_str(&text).map_err(|e| {
            AuthError::Store(format!("credentials file {}: {e}", path.display()))
        })?;
        Ok(Self::new(entries))
    }
}

impl Authenticator for StaticCredentialTable {
    fn authenticate(&self, credentials: &Credentials) -> Result<Role, AuthError> {
        self.entries
            .iter()
            .find(|e| e.username == credentials.username && e.password == credentials.password)
            .map(|e| e.role)
            .ok_or(AuthError::Rejected)
    }
}

// ---------------------------------------------------------------------------
// Session store
// ---------------------------------------------------------------------------

/// The flags persisted by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(rename = "userRole")]
    pub role: Role,
    #[serde(rename = "lastLogin")]
    pub last_login: DateTime<Utc>,
}

/// File-backed session flag store.
///
/// A missing file simply means "not logged in"; it is not an error.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a login. Overwrites any previous session.
    pub fn login(&self, role: Role, at: DateTime<Utc>) -> Result<SessionRecord, AuthError> {
        let record = SessionRecord {
            role,
            last_login: at,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.store_err(e))?;
            }
        }
        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| AuthError::Store(format!("serialize session failed: {e}")))?;
        fs::write(&self.path, format!("{json}\n")).map_err(|e| self.store_err(e))?;
        Ok(record)
    }

    /// Read the current session, if any.
    pub fn current(&self) -> Result<Option<SessionRecord>, AuthError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.store_err(e)),
        };
        let record = serde_json::from_str(&text)
            .map_err(|e| AuthError::Store(format!("session file {}: {e}", self.path.display())))?;
        Ok(Some(record))
    }

    /// Clear the session. Returns `true` if a session existed.
    pub fn logout(&self) -> Result<bool, AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(self.store_err(e)),
        }
    }

    fn store_err(&self, e: io::Error) -> AuthError {
        AuthError::Store(format!("session file {}: {e}", self.path.display()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
