//! Application settings.
//!
//! An optional `settings.json` in the XDG config directory
//! (`~/.config/portsweep/settings.json` on Linux) supplies defaults that
//! command-line flags override.

use crate::error::{ConfigError, ConfigResult};
use crate::scanner::{DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT};
use crate::types::DEFAULT_PORTS;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the settings file, if a config directory exists.
pub fn default_settings_file() -> Option<PathBuf> {
    ProjectDirs::from("", "", "portsweep").map(|dirs| dirs.config_dir().join("settings.json"))
}

/// Scan defaults loaded from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default port specification.
    pub ports: String,
    /// Default number of worker threads.
    pub threads: usize,
    /// Default per-probe timeout in seconds.
    pub timeout_secs: f64,
    /// Grab banners by default.
    pub banner: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ports: DEFAULT_PORTS.to_string(),
            threads: DEFAULT_CONCURRENCY.get(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs_f64(),
            banner: false,
        }
    }
}

impl Settings {
    /// Load settings from the default location.
    ///
    /// A missing file is not an error.
    pub fn load() -> ConfigResult<Self> {
        let file = default_settings_file().ok_or(ConfigError::DirectoryNotFound)?;

        if !file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }
}
