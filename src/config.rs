//! Client configuration.
//!
//! Holds the service base URL and the location of the on-disk session
//! store. Configuration is an explicit value handed to `ApiClient`;
//! nothing here is process-global.

use std::path::PathBuf;

use anyhow::Result;

/// Application name used for cache directory paths
const APP_NAME: &str = "tokenport";

/// Default service endpoint for local development
const DEFAULT_BASE_URL: &str = "http://localhost:8080/";

/// Environment variable naming the service base URL
const ENV_BASE_URL: &str = "TOKENPORT_BASE_URL";

#[derive(Debug, Clone)]
pub struct Config {
    base_url: String,
    cache_dir: Option<PathBuf>,
}

impl Config {
    /// Create a configuration for the given base URL.
    ///
    /// A trailing `/` is appended if absent; passing an already
    /// normalized URL is a no-op.
    pub fn new(base_url: &str) -> Self {
        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            base_url,
            cache_dir: None,
        }
    }

    /// Build configuration from the environment.
    ///
    /// Reads `TOKENPORT_BASE_URL` (a `.env` file is honored if present)
    /// and falls back to the local development endpoint.
    pub fn from_env() -> Self {
        // Load .env file if present (silently ignore if not found)
        let _ = dotenvy::dotenv();
        let base_url =
            std::env::var(ENV_BASE_URL).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&base_url)
    }

    /// Override the session store directory (tests and embedders).
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Directory holding the persisted session.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.cache_dir {
            return Ok(dir.clone());
        }
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        assert_eq!(
            Config::new("http://api.example.com").base_url(),
            "http://api.example.com/"
        );
        assert_eq!(
            Config::new("http://api.example.com/").base_url(),
            "http://api.example.com/"
        );
    }

    #[test]
    fn test_cache_dir_override() {
        let config = Config::default().with_cache_dir("/tmp/tokenport-test");
        assert_eq!(
            config.cache_dir().unwrap(),
            PathBuf::from("/tmp/tokenport-test")
        );
    }
}
