//! Client configuration.
//!
//! # Responsibility
//! - Describe the connected platform and local runtime settings.
//! - Load them from a JSON file or `SPLUNK_INPUTS_*` environment variables.
//!
//! # Invariants
//! - `platform_version` is always present; everything else has a default.

use crate::logging::default_log_level;
use crate::service::context::ServiceContext;
use crate::version::VersionError;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_PLATFORM_VERSION: &str = "SPLUNK_INPUTS_PLATFORM_VERSION";
pub const ENV_LOG_LEVEL: &str = "SPLUNK_INPUTS_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "SPLUNK_INPUTS_LOG_DIR";
pub const ENV_STORE_PATH: &str = "SPLUNK_INPUTS_STORE";

/// Runtime settings for one client session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Version string reported by the connected platform.
    pub platform_version: String,
    #[serde(default = "default_log_level_string")]
    pub log_level: String,
    /// Absolute directory for rolling log files; logging is off when unset.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    /// Local entity store file; in-memory when unset.
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

fn default_log_level_string() -> String {
    default_log_level().to_string()
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, message: String },
    Parse(String),
    Missing(&'static str),
    Version(VersionError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, message } => {
                write!(f, "failed to read config `{}`: {message}", path.display())
            }
            Self::Parse(message) => write!(f, "invalid config: {message}"),
            Self::Missing(name) => write!(f, "missing required setting `{name}`"),
            Self::Version(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Version(err) => Some(err),
            _ => None,
        }
    }
}

impl From<VersionError> for ConfigError {
    fn from(value: VersionError) -> Self {
        Self::Version(value)
    }
}

impl ClientConfig {
    pub fn from_json_str(value: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(value).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Self::from_json_str(&raw)
    }

    /// Reads `SPLUNK_INPUTS_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any name-to-value lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let platform_version =
            non_empty(ENV_PLATFORM_VERSION).ok_or(ConfigError::Missing(ENV_PLATFORM_VERSION))?;
        Ok(Self {
            platform_version,
            log_level: non_empty(ENV_LOG_LEVEL).unwrap_or_else(default_log_level_string),
            log_dir: non_empty(ENV_LOG_DIR).map(PathBuf::from),
            store_path: non_empty(ENV_STORE_PATH).map(PathBuf::from),
        })
    }

    /// Session context for the configured platform version.
    pub fn service_context(&self) -> Result<ServiceContext, ConfigError> {
        Ok(ServiceContext::from_version_str(&self.platform_version)?)
    }
}
