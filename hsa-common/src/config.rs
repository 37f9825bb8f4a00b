//! Configuration loading and workbook path resolution
//!
//! Bootstrap settings come from an optional TOML file. The workbook path is
//! resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`HSA_WORKBOOK`)
//! 3. TOML config file (`workbook` key)
//! 4. Compiled default (`hsa.db` in the working directory)
//!
//! A missing or unreadable config file is never fatal: defaults apply.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable overriding the workbook path
pub const WORKBOOK_ENV_VAR: &str = "HSA_WORKBOOK";

/// Workbook used when nothing else is configured
pub const DEFAULT_WORKBOOK: &str = "hsa.db";

/// Address the viewer binds to by default
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5730";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TomlConfig {
    /// Workbook file (SQLite, one table per sheet)
    #[serde(default)]
    pub workbook: Option<PathBuf>,

    /// HTTP listen address
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_bind_address() -> String {
    DEFAULT_BIND_ADDRESS.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            workbook: None,
            bind_address: default_bind_address(),
            logging: LoggingConfig::default(),
        }
    }
}

impl TomlConfig {
    /// Parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load `path` if given, else the platform config file, else defaults.
    ///
    /// Failures are logged and replaced by defaults.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match locate_config_file() {
                Ok(p) => p,
                Err(e) => {
                    debug!("{}; using built-in defaults", e);
                    return Self::default();
                }
            },
        };

        match Self::load(&path) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!(
                    "Could not load config {}: {}; using built-in defaults",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }
}

/// Find the platform config file
///
/// Linux checks `~/.config/hsa/config.toml`, then `/etc/hsa/config.toml`.
fn locate_config_file() -> Result<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("hsa").join("config.toml"));

    if let Some(path) = user_config {
        if path.exists() {
            return Ok(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/hsa/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
    }

    Err(Error::Config("No config file found".to_string()))
}

/// Resolve the workbook path using the documented priority order
pub fn resolve_workbook_path(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(WORKBOOK_ENV_VAR) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = &config.workbook {
        return path.clone();
    }

    // Priority 4: Compiled default
    PathBuf::from(DEFAULT_WORKBOOK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TomlConfig::default();
        assert_eq!(config.workbook, None);
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: TomlConfig = toml::from_str(r#"workbook = "/data/hsa.db""#).unwrap();
        assert_eq!(config.workbook, Some(PathBuf::from("/data/hsa.db")));
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_cli_argument_wins() {
        let config = TomlConfig {
            workbook: Some(PathBuf::from("/from/config.db")),
            ..TomlConfig::default()
        };
        let resolved = resolve_workbook_path(Some(Path::new("/from/cli.db")), &config);
        assert_eq!(resolved, PathBuf::from("/from/cli.db"));
    }
}
