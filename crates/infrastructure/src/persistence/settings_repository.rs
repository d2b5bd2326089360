//! Test app settings persistence.
//!
//! Settings live in a JSON file chosen by the caller, typically checked in
//! next to the functional tests of a site.

use std::path::{Path, PathBuf};

use livetest_domain::{DomainError, LiveTestSettings};
use tokio::fs;

use crate::serialization::{SerializationError, from_json_bytes, to_json_stable_bytes};

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// A required environment variable is not set.
    #[error("Environment variable {0} is not set")]
    MissingVar(&'static str),

    /// An environment variable holds a value that cannot be used.
    #[error("Invalid value {value:?} for {name}: {reason}")]
    InvalidVar {
        /// Variable name.
        name: &'static str,
        /// Value found.
        value: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The settings were read but do not describe a usable site.
    #[error("Invalid settings: {0}")]
    Invalid(#[from] DomainError),
}

/// Repository for settings stored in one JSON file.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    path: PathBuf,
}

impl SettingsRepository {
    /// Creates a repository for the settings file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path where settings are stored.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads settings from disk.
    ///
    /// Returns `None` if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid settings
    /// JSON, or names an unusable host.
    pub async fn load(&self) -> Result<Option<LiveTestSettings>, SettingsError> {
        if !fs::try_exists(&self.path).await? {
            return Ok(None);
        }

        let content = fs::read(&self.path).await?;
        let settings: LiveTestSettings = from_json_bytes(&content)?;
        settings.validate()?;
        Ok(Some(settings))
    }

    /// Saves settings to disk, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be serialized or written.
    pub async fn save(&self, settings: &LiveTestSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }

        let content = to_json_stable_bytes(settings)?;
        fs::write(&self.path, content).await?;

        Ok(())
    }
}
