//! Configuration management for geyser-sync

pub mod schema;

pub use schema::{HostRecord, Settings};

use crate::error::{SyncError, SyncResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Settings manager for the optional TOML file
pub struct SettingsManager {
    config_path: PathBuf,
}

impl SettingsManager {
    /// Create a new settings manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a settings manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default settings file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("geyser-sync")
            .join("config.toml")
    }

    /// Load settings, falling back to defaults if the file does not exist
    pub fn load(&self) -> SyncResult<Settings> {
        if !self.config_path.exists() {
            debug!("Settings file not found, using defaults");
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(&self.config_path).map_err(|e| {
            SyncError::io(
                format!("reading settings from {}", self.config_path.display()),
                e,
            )
        })?;

        toml::from_str(&content).map_err(|e| SyncError::ConfigInvalid {
            path: self.config_path.clone(),
            reason: e.to_string(),
        })
    }

    /// Get the settings file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for SettingsManager {
    fn default() -> Self {
        Self::new()
    }
}

/// File-backed store for the connection record
///
/// The record is read once at the start of a run and rewritten in full
/// only after a successful deployment.
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Create a store for the given `host.json` path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read and parse the record
    pub fn load(&self) -> SyncResult<HostRecord> {
        if !self.path.exists() {
            return Err(SyncError::StateNotFound(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| SyncError::io(format!("reading state from {}", self.path.display()), e))?;

        serde_json::from_str(&content).map_err(|e| SyncError::StateInvalid {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    /// Serialize the whole record back to disk
    ///
    /// Writes to a sibling temp file first and renames it over the
    /// original, so a crash mid-write never truncates the record.
    pub fn save(&self, record: &HostRecord) -> SyncResult<()> {
        let content = serde_json::to_string_pretty(record)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, content)
            .map_err(|e| SyncError::io(format!("writing state to {}", tmp.display()), e))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            SyncError::io(format!("replacing state file {}", self.path.display()), e)
        })?;

        info!("State saved to {}", self.path.display());
        Ok(())
    }

    /// Get the state file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}
