//! Application configuration file.
//!
//! # Invariants
//! - A missing config file yields defaults, never an error.
//! - Every field is optional; unset fields resolve through `effective_*`.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Diary file used when neither config nor flags name one.
pub const DEFAULT_DATA_FILE: &str = "data/fooddiary.json";
/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Config read/write failure.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "config io error: {err}"),
            Self::Json(err) => write!(f, "config is not valid JSON: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Settings persisted in the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Diary JSON file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    /// One of trace|debug|info|warn|error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    /// Directory for rolling log files. Logging stays off when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn effective_data_file(&self) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
    }

    pub fn effective_log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or(crate::logging::default_log_level())
    }

    /// Overlays every field set in `overrides`.
    pub fn merged(mut self, overrides: AppConfig) -> Self {
        if overrides.data_file.is_some() {
            self.data_file = overrides.data_file;
        }
        if overrides.log_level.is_some() {
            self.log_level = overrides.log_level;
        }
        if overrides.log_dir.is_some() {
            self.log_dir = overrides.log_dir;
        }
        self
    }
}

/// Reads the config at `path`.
///
/// # Errors
/// - `Io` when the file exists but cannot be read.
/// - `Json` when the file is not a valid config document.
pub fn load_config(path: &Path) -> ConfigResult<AppConfig> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            info!(
                "event=config_load module=config status=missing path={}",
                path.display()
            );
            return Ok(AppConfig::default());
        }
        Err(err) => return Err(err.into()),
    };
    serde_json::from_str(&raw).map_err(|err| {
        warn!(
            "event=config_load module=config status=error path={} error={err}",
            path.display()
        );
        ConfigError::Json(err)
    })
}

/// Writes `config` to `path` as pretty JSON, creating parent directories.
pub fn save_config(path: &Path, config: &AppConfig) -> ConfigResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let raw = serde_json::to_string_pretty(config)?;
    std::fs::write(path, raw)?;
    Ok(())
}
