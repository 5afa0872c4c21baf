//! User configuration loaded from `config.json` in the platform config dir.
//!
//! Every key is optional; a missing file means all defaults.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::form::ComparePolicy;

const APP_DIR: &str = "calldesk";
const CONFIG_FILE: &str = "config.json";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The platform provides neither a config nor a data directory.
    #[error("could not determine {0} directory")]
    NoDir(&'static str),
}

/// Per-form comparison settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Field names excluded from change detection.
    pub non_comparable: Vec<String>,
}

impl FormConfig {
    pub fn policy(&self) -> ComparePolicy {
        ComparePolicy::new(self.non_comparable.iter().cloned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormsConfig {
    pub report: FormConfig,
    pub user: FormConfig,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            report: FormConfig {
                non_comparable: vec!["updated_at".to_string()],
            },
            user: FormConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where records and the log file live. Defaults to the XDG data dir.
    pub data_dir: Option<PathBuf>,
    /// Where forwarded reports are written. Defaults to `<data_dir>/outbox`.
    pub outbox_dir: Option<PathBuf>,
    pub page_size: usize,
    pub notification_timeout_secs: u64,
    /// `tracing` filter directive, overridden by `CALLDESK_LOG`.
    pub log_filter: String,
    pub forms: FormsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            outbox_dir: None,
            page_size: 10,
            notification_timeout_secs: 5,
            log_filter: "info".to_string(),
            forms: FormsConfig::default(),
        }
    }
}

impl Config {
    /// Loads `~/.config/calldesk/config.json`, falling back to defaults when absent.
    pub fn load() -> Result<Self, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoDir("config"))?;
        Self::load_from(&dir.join(APP_DIR).join(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
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

    /// Resolved data directory.
    pub fn data_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|d| d.join(APP_DIR))
                .ok_or(ConfigError::NoDir("data")),
        }
    }

    /// Resolved outbox directory.
    pub fn outbox_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.outbox_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(self.data_dir()?.join("outbox")),
        }
    }

    /// Page size, never zero.
    pub fn page_size(&self) -> usize {
        self.page_size.max(1)
    }
}
