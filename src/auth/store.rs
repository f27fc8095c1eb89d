use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use super::SessionToken;

/// Session file name in the store directory
const SESSION_FILE: &str = "session.json";

/// File-backed session store.
///
/// Loading is failure-tolerant: an absent, unreadable, unparsable, or
/// expired session all read back as `None` rather than an error.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Persist a session, replacing any previous one.
    pub fn save(&self, token: &SessionToken) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .context("Failed to create session store directory")?;
        let contents = serde_json::to_string_pretty(token)?;
        std::fs::write(self.session_path(), contents).context("Failed to write session file")?;
        debug!(user = %token.user_name, "session persisted");
        Ok(())
    }

    /// Load the stored session if it is present, parsable, and unexpired.
    pub fn load(&self) -> Option<SessionToken> {
        let token = self.load_any()?;
        if token.is_expired() {
            debug!("stored session is expired");
            return None;
        }
        Some(token)
    }

    /// Load the stored session ignoring expiry.
    ///
    /// The user name can still be derived from an expired session;
    /// authorization cannot.
    pub fn load_any(&self) -> Option<SessionToken> {
        let contents = std::fs::read_to_string(self.session_path()).ok()?;
        match serde_json::from_str(&contents) {
            Ok(token) => Some(token),
            Err(e) => {
                debug!(error = %e, "failed to parse stored session");
                None
            }
        }
    }

    /// Authorization header value for the current session, if any.
    pub fn bearer(&self) -> Option<String> {
        self.load().map(|t| t.bearer())
    }

    /// User name recorded in the stored session, if any.
    pub fn user_name(&self) -> Option<String> {
        self.load_any()
            .map(|t| t.user_name)
            .filter(|name| !name.is_empty())
    }

    /// Whether a valid unexpired session is currently stored.
    pub fn is_logged_in(&self) -> bool {
        self.load().is_some()
    }

    /// Remove the stored session.
    pub fn clear(&self) -> Result<()> {
        let path = self.session_path();
        if path.exists() {
            std::fs::remove_file(path).context("Failed to remove session file")?;
        }
        Ok(())
    }

    fn session_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }
}
