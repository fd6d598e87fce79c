//! # Configuration
//!
//! Optional TOML configuration for the `archplan` binary.
//!
//! ```toml
//! data = "data/saradominist.toml"
//! storage = "storage.toml"
//!
//! [log]
//! format = "text"          # or "json"
//! filter = "archplan=info"
//! ```
//!
//! Precedence: CLI flag > config file > built-in default.
//! `ARCHPLAN_LOG_FORMAT` overrides `log.format`.

use archplan_core::ArchplanError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "archplan.toml";

/// Environment variable overriding the log output format.
pub const LOG_FORMAT_ENV: &str = "ARCHPLAN_LOG_FORMAT";

/// Maximum config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parse a format name; anything other than `json` is text.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// The `[log]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub format: LogFormat,
    /// `EnvFilter` directive, e.g. `archplan=debug`.
    pub filter: Option<String>,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArchplanConfig {
    /// Dataset file loaded into the knowledge base.
    pub data: Option<PathBuf>,
    /// Default material storage file for `plan`.
    pub storage: Option<PathBuf>,
    pub log: LogConfig,
}

impl ArchplanConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ArchplanError> {
        toml::from_str(text).map_err(|e| {
            ArchplanError::DeserializationError(format!("Invalid configuration: {}", e))
        })
    }

    /// Read configuration from a file.
    ///
    /// Relative `data` and `storage` paths are resolved against the
    /// directory holding the config file.
    pub fn load(path: &Path) -> Result<Self, ArchplanError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            ArchplanError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ArchplanError::IoError(format!(
                "Config '{}' exceeds maximum size of {} bytes",
                path.display(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let text = std::fs::read_to_string(path).map_err(|e| {
            ArchplanError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        let mut config = Self::from_toml_str(&text)?;

        if let Some(base) = path.parent() {
            config.data = config.data.map(|p| resolve(base, p));
            config.storage = config.storage.map(|p| resolve(base, p));
        }
        Ok(config)
    }

    /// Locate and load the configuration.
    ///
    /// An explicit path must exist. Without one, `archplan.toml` in the
    /// working directory is used if present, otherwise the defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ArchplanError> {
        let mut config = match explicit {
            Some(path) => Self::load(path)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::load(default)?
                } else {
                    Self::default()
                }
            }
        };

        if let Ok(format) = std::env::var(LOG_FORMAT_ENV) {
            config.log.format = LogFormat::from_name(&format);
        }
        Ok(config)
    }
}

fn resolve(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

// =============================================================================
// TESTS
// =============================================================================
