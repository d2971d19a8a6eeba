use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Token file name in the user's home directory
const TOKEN_FILE: &str = ".quantum_scholar_token";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionData {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl SessionData {
    pub fn new(token: String, email: &str) -> Self {
        Self {
            token,
            email: Some(email.to_string()),
            saved_at: Some(Utc::now()),
        }
    }
}

/// The persisted login: the access token and who it belongs to
pub struct Session {
    path: PathBuf,
    pub data: Option<SessionData>,
}

impl Session {
    pub fn new(path: PathBuf) -> Self {
        Self { path, data: None }
    }

    /// `~/.quantum_scholar_token`
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
        Ok(home.join(TOKEN_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the token file; returns whether a usable token was found
    pub fn load(&mut self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        let contents = std::fs::read_to_string(&self.path)
            .context("Failed to read token file")?;
        let data: SessionData = serde_json::from_str(&contents)
            .context("Failed to parse token file")?;

        if data.token.is_empty() {
            debug!("Token file holds an empty token");
            return Ok(false);
        }
        self.data = Some(data);
        Ok(true)
    }

    /// Write the token file, readable by the owner only
    pub fn save(&self) -> Result<()> {
        let Some(ref data) = self.data else {
            return Ok(());
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string(data)?;

        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options
            .open(&self.path)
            .with_context(|| format!("Failed to open token file {}", self.path.display()))?;
        // mode() only applies on create; tighten files left by older clients
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))
                .context("Failed to restrict token file permissions")?;
        }
        file.write_all(contents.as_bytes())
            .context("Failed to write token file")?;
        debug!(path = %self.path.display(), "Token saved");
        Ok(())
    }

    /// Forget the token and remove the file
    pub fn clear(&mut self) -> Result<()> {
        self.data = None;
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove token file {}", self.path.display()))?;
        }
        Ok(())
    }

    pub fn update(&mut self, data: SessionData) {
        self.data = Some(data);
    }

    pub fn token(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.token.as_str())
    }

    pub fn email(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.email.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_in(dir: &tempfile::TempDir) -> Session {
        Session::new(dir.path().join(TOKEN_FILE))
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);
        session.update(SessionData::new("abc123".to_string(), "me@example.com"));
        session.save().unwrap();

        let mut reloaded = session_in(&dir);
        assert!(reloaded.load().unwrap());
        assert_eq!(reloaded.token(), Some("abc123"));
        assert_eq!(reloaded.email(), Some("me@example.com"));
    }

    #[test]
    fn test_loads_token_only_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);
        std::fs::write(session.path(), r#"{"token": "legacy"}"#).unwrap();

        assert!(session.load().unwrap());
        assert_eq!(session.token(), Some("legacy"));
        assert_eq!(session.email(), None);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);
        assert!(!session.load().unwrap());
        assert!(session.token().is_none());
    }

    #[test]
    fn test_empty_token_is_not_a_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);
        std::fs::write(session.path(), r#"{"token": ""}"#).unwrap();
        assert!(!session.load().unwrap());
        assert!(session.token().is_none());
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);
        session.update(SessionData::new("t".to_string(), "x@y.z"));
        session.save().unwrap();
        assert!(session.path().exists());

        session.clear().unwrap();
        assert!(!session.path().exists());
        assert!(session.token().is_none());

        // Clearing twice is fine
        session.clear().unwrap();
    }

    #[test]
    fn test_save_without_data_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(&dir);
        session.save().unwrap();
        assert!(!session.path().exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_token_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);
        session.update(SessionData::new("secret".to_string(), "x@y.z"));
        session.save().unwrap();

        let mode = std::fs::metadata(session.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_tightens_existing_world_readable_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);
        std::fs::write(session.path(), r#"{"token": "legacy"}"#).unwrap();
        std::fs::set_permissions(session.path(), std::fs::Permissions::from_mode(0o644)).unwrap();

        session.update(SessionData::new("fresh".to_string(), "x@y.z"));
        session.save().unwrap();

        let mode = std::fs::metadata(session.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert!(std::fs::read_to_string(session.path()).unwrap().contains("fresh"));
    }
}
