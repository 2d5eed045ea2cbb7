//! Persisted session - the stored-session file the browser kept in
//! localStorage.
//!
//! The session is loaded once per invocation and handed to the client at
//! construction; it is written on login and deleted on logout.

use crate::error::{CliError, Result};
use edushare_sdk::Session;
use std::fs;
use std::path::PathBuf;

/// Reads and writes the session file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store at the default location (`~/.edushare/session.json`).
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(Self::at(home.join(".edushare").join("session.json")))
    }

    /// Store at an explicit path.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the stored session, if one exists.
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)?;
        let session: Session = serde_json::from_str(&contents)?;
        Ok(Some(session))
    }

    /// Load the stored session or fail if not logged in.
    pub fn require(&self) -> Result<Session> {
        self.load()?.ok_or(CliError::NotLoggedIn)
    }

    /// Persist a session.
    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }

    /// Delete the stored session. Missing file is fine.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn session() -> Session {
        Session {
            user_id: 1,
            username: "alice".to_string(),
            token: "9944b09199c62bcf".to_string(),
        }
    }

    #[test]
    fn test_save_load_clear_roundtrip() {
        let dir = tempdir().unwrap();
        let store = SessionStore::at(dir.path().join("session.json"));

        assert!(store.load().unwrap().is_none());

        store.save(&session()).unwrap();
        let loaded = store.require().unwrap();
        assert_eq!(loaded.user_id, 1);
        assert_eq!(loaded.username, "alice");

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        // Clearing twice is fine.
        store.clear().unwrap();
    }

    #[test]
    fn test_require_without_session() {
        let dir = tempdir().unwrap();
        let store = SessionStore::at(dir.path().join("session.json"));
        assert!(matches!(store.require(), Err(CliError::NotLoggedIn)));
    }
}
