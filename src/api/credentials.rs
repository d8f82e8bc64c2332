//! Kaggle API credential discovery
//!
//! Lookup order:
//! 1. `KAGGLE_USERNAME` and `KAGGLE_KEY` environment variables
//! 2. `$KAGGLE_CONFIG_DIR/kaggle.json`
//! 3. `~/.kaggle/kaggle.json`

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::utils::error::NotebookError;

/// Username/key pair for the Kaggle API
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(username: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            key: key.into(),
        }
    }

    /// Both fields are non-empty
    pub fn is_complete(&self) -> bool {
        !self.username.trim().is_empty() && !self.key.trim().is_empty()
    }

    /// Read `KAGGLE_USERNAME` / `KAGGLE_KEY`
    pub fn from_env() -> Option<Self> {
        let username = std::env::var("KAGGLE_USERNAME").ok()?;
        let key = std::env::var("KAGGLE_KEY").ok()?;
        let credentials = Self::new(username, key);
        credentials.is_complete().then_some(credentials)
    }

    /// Read a `kaggle.json` file
    ///
    /// # Errors
    ///
    /// Returns `NotebookError::Authentication` if the file is unreadable,
    /// malformed or incomplete
    pub fn from_file(path: &Path) -> Result<Self, NotebookError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            NotebookError::Authentication(format!("cannot read {}: {e}", path.display()))
        })?;

        let credentials: Self = serde_json::from_str(&content).map_err(|e| {
            NotebookError::Authentication(format!("malformed {}: {e}", path.display()))
        })?;

        if !credentials.is_complete() {
            return Err(NotebookError::Authentication(format!(
                "incomplete credentials in {}",
                path.display()
            )));
        }

        Ok(credentials)
    }

    /// Location of `kaggle.json`, if a config or home directory is known
    pub fn default_file_path() -> Option<PathBuf> {
        if let Ok(dir) = std::env::var("KAGGLE_CONFIG_DIR") {
            return Some(PathBuf::from(dir).join("kaggle.json"));
        }

        std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .ok()
            .map(|home| PathBuf::from(home).join(".kaggle").join("kaggle.json"))
    }

    /// Find credentials in the environment, then in `kaggle.json`
    ///
    /// # Errors
    ///
    /// Returns `NotebookError::Authentication` if no source provides them
    pub fn discover() -> Result<Self, NotebookError> {
        if let Some(credentials) = Self::from_env() {
            tracing::debug!(source = "env", "Found Kaggle credentials");
            return Ok(credentials);
        }

        match Self::default_file_path() {
            Some(path) if path.exists() => {
                let credentials = Self::from_file(&path)?;
                tracing::debug!(source = %path.display(), "Found Kaggle credentials");
                Ok(credentials)
            }
            _ => Err(NotebookError::Authentication(
                "set KAGGLE_USERNAME and KAGGLE_KEY or provide ~/.kaggle/kaggle.json".to_string(),
            )),
        }
    }
}
