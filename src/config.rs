//! Persistent settings, stored as JSON in the platform config directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine a config directory")]
    NoConfigDir,

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigError::NoConfigDir => {
                "No config directory found; pass --config to choose a file".to_string()
            }
            ConfigError::Io { path, source } => {
                format!("Cannot access {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                format!("Fix or delete {}: {}", path.display(), source)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the catalog site.
    pub base_url: String,
    /// Page loaded at startup, relative to `base_url`.
    pub start_path: String,
    pub search_path: String,
    /// Unset means no client-side timeout.
    pub request_timeout_secs: Option<u64>,
    /// Program used to open URLs externally; platform default when unset.
    pub open_command: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/".to_string(),
            start_path: "/".to_string(),
            search_path: "/api/search".to_string(),
            request_timeout_secs: None,
            open_command: None,
        }
    }
}

pub fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("org", "plant-explorer", "plant-explorer")
}

impl Config {
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        project_dirs()
            .map(|dirs| dirs.config_dir().join("config.json"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Read settings from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Settings for a run. Without a config directory there is no file to
    /// read, so the built-in defaults apply.
    pub fn load_or_default(path: Result<PathBuf, ConfigError>) -> Result<Self, ConfigError> {
        match path {
            Ok(path) => Self::load_from(&path),
            Err(ConfigError::NoConfigDir) => {
                tracing::warn!("no config directory, using built-in settings");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(io_err)
    }

    pub fn request_timeout(&self) -> Option<std::time::Duration> {
        self.request_timeout_secs.map(std::time::Duration::from_secs)
    }
}
