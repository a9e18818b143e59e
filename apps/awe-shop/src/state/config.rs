//! # Storefront Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     AWE_DATA_DIR=/srv/awe                                              │
//! │     AWE_STORE_NAME="AWE Outlet"                                        │
//! │     AWE_MAX_LOGIN_ATTEMPTS=5                                           │
//! │     AWE_LOG=debug                                                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │     ~/Library/Application Support/com.awe.storefront/... (macOS)       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! data_dir = "/srv/awe"
//! store_name = "AWE Electronics"
//! max_login_attempts = 3
//! log_filter = "warn,awe_core=info"
//! ```
//!
//! Read-only after startup, so the session just owns a copy.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};

/// Config file name inside the platform config directory.
pub const CONFIG_FILE: &str = "storefront.toml";

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding catalogue.json, cart.json and users.json.
    pub data_dir: PathBuf,

    /// Shown in the welcome banner and on receipts.
    pub store_name: String,

    /// Failed logins allowed before returning to the welcome menu.
    pub max_login_attempts: u32,

    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_dir: default_data_dir(),
            store_name: "AWE Electronics".to_string(),
            max_login_attempts: 3,
            log_filter: "warn".to_string(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "awe", "storefront")
}

/// Platform data directory, or `./data` when there is no home directory.
fn default_data_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("data"))
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (explicit path, else the platform config file if present)
    /// 3. Environment variables
    ///
    /// An explicit path that does not exist is an error; a missing platform
    /// config file is not.
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parses one TOML file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if self.store_name.trim().is_empty() {
            return Err(AppError::Config("store_name must not be empty".into()));
        }

        if self.max_login_attempts == 0 {
            return Err(AppError::Config(
                "max_login_attempts must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `AWE_*` environment variable overrides.
    fn apply_env_overrides(&mut self) -> AppResult<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from any key lookup. An unparseable number is a
    /// config error, reported before tracing is up.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> AppResult<()> {
        if let Some(dir) = lookup("AWE_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data directory from environment");
            self.data_dir = PathBuf::from(dir);
        }

        if let Some(name) = lookup("AWE_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(attempts) = lookup("AWE_MAX_LOGIN_ATTEMPTS") {
            self.max_login_attempts = attempts.trim().parse::<u32>().map_err(|_| {
                AppError::Config(format!(
                    "AWE_MAX_LOGIN_ATTEMPTS must be a whole number, got '{}'",
                    attempts
                ))
            })?;
        }

        if let Some(filter) = lookup("AWE_LOG") {
            self.log_filter = filter;
        }
        Ok(())
    }

    /// Returns the platform config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.store_name, "AWE Electronics");
        assert_eq!(config.max_login_attempts, 3);
        assert_eq!(config.log_filter, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();

        config.max_login_attempts = 0;
        assert!(config.validate().is_err());

        config.max_login_attempts = 1;
        config.store_name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("AWE_DATA_DIR", "/tmp/awe"),
            ("AWE_STORE_NAME", "AWE Outlet"),
            ("AWE_MAX_LOGIN_ATTEMPTS", "5"),
            ("AWE_LOG", "debug"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/awe"));
        assert_eq!(config.store_name, "AWE Outlet");
        assert_eq!(config.max_login_attempts, 5);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_bad_number_override_is_config_error() {
        let mut config = AppConfig::default();
        let err = config
            .apply_overrides(|key| (key == "AWE_MAX_LOGIN_ATTEMPTS").then(|| "many".to_string()))
            .unwrap_err();

        match err {
            AppError::Config(message) => {
                assert!(message.contains("AWE_MAX_LOGIN_ATTEMPTS"));
                assert!(message.contains("'many'"));
            }
            other => panic!("expected a config error, got {:?}", other),
        }
    }

    #[test]
    fn test_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "store_name = \"AWE Outlet\"\nmax_login_attempts = 2\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.store_name, "AWE Outlet");
        assert_eq!(config.max_login_attempts, 2);
        // Unset keys keep their defaults
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load(Some(dir.path().join("nope.toml")));
        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "max_login_attempts = \"three\"").unwrap();
        assert!(matches!(
            AppConfig::from_file(&path),
            Err(AppError::ConfigParse(_))
        ));
    }
}
