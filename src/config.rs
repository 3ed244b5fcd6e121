//! Client configuration.
//!
//! Values are layered: built-in defaults, then an optional JSON file, then environment
//! variables, then whatever the command line sets on top.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::gateway::DEFAULT_BASE_URL;
use crate::storage::FileKeyValueStore;

pub const ENV_BASE_URL: &str = "DOGMATCH_BASE_URL";
pub const ENV_DATA_DIR: &str = "DOGMATCH_DATA_DIR";
pub const ENV_NAME: &str = "DOGMATCH_NAME";
pub const ENV_EMAIL: &str = "DOGMATCH_EMAIL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Io { path: PathBuf, message: String },
    Parse { path: PathBuf, message: String },
    /// Login needs both a name and an email.
    MissingCredentials,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, message } => {
                write!(f, "cannot read config {}: {}", path.display(), message)
            }
            ConfigError::Parse { path, message } => {
                write!(f, "invalid config {}: {}", path.display(), message)
            }
            ConfigError::MissingCredentials => write!(
                f,
                "name and email are required to log in (set {} and {})",
                ENV_NAME, ENV_EMAIL
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dog service base URL.
    pub base_url: String,
    /// Directory holding the persisted favorites.
    pub data_dir: PathBuf,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: default_data_dir(),
            name: None,
            email: None,
        }
    }
}

/// `<platform data dir>/dogmatch`, or `./dogmatch` where the platform has none.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dogmatch")
}

impl Config {
    /// Defaults overlaid with `path` if given, then with the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(std::env::vars());
        Ok(config)
    }

    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Overlay `DOGMATCH_*` variables from `vars`. Empty values are ignored.
    pub fn apply_env<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                ENV_BASE_URL => self.base_url = value,
                ENV_DATA_DIR => self.data_dir = PathBuf::from(value),
                ENV_NAME => self.name = Some(value),
                ENV_EMAIL => self.email = Some(value),
                _ => {}
            }
        }
    }

    /// Name and email for `/auth/login`.
    pub fn credentials(&self) -> Result<(&str, &str), ConfigError> {
        match (self.name.as_deref(), self.email.as_deref()) {
            (Some(name), Some(email)) => Ok((name, email)),
            _ => Err(ConfigError::MissingCredentials),
        }
    }

    /// File-backed store under `data_dir`.
    pub fn store(&self) -> FileKeyValueStore {
        FileKeyValueStore::new(&self.data_dir)
    }
}
