//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! All service locations and branching policy live in a single [`Config`]
//! value that is passed to every component at construction. Nothing reads
//! process-wide constants, so tests can point the whole tool at local
//! remotes and mock servers.
//!
//! # Locations
//!
//! Searched in order; the first existing file wins:
//! 1. the `--config` path (must exist)
//! 2. `$ROS2_RELEASE_BRANCHES_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/ros2-release-branches/config.toml`
//! 4. `~/.ros2-release-branches/config.toml`
//!
//! With no file, defaults are used.
//!
//! # Example
//!
//! ```no_run
//! use ros2_release_branches::core::config::Config;
//!
//! let loaded = Config::load(None).unwrap();
//! println!("manifest: {}", loaded.config.manifest.repo_url);
//! ```

pub mod schema;

pub use schema::{
    CommitIdentity, Config, CredentialsConfig, GitHubConfig, ManifestConfig, ReleaseConfig,
    RosdistroConfig, DEFAULT_SKIP_LIST,
};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "ROS2_RELEASE_BRANCHES_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// The file it came from, if any.
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration.
    ///
    /// An `explicit` path must exist. Otherwise the standard locations are
    /// searched and defaults are used when none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed
    /// or validated.
    pub fn load(explicit: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let path = match explicit {
            Some(path) if path.exists() => Some(path.to_path_buf()),
            Some(path) => return Err(ConfigError::NotFound(path.to_path_buf())),
            None => Self::find_default(),
        };

        let config = match &path {
            Some(path) => Self::read(path)?,
            None => Config::default(),
        };
        config.validate()?;

        Ok(ConfigLoadResult { config, path })
    }

    /// Read and parse a config file without validating it.
    pub fn read(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn find_default() -> Option<PathBuf> {
        // 1. Check $ROS2_RELEASE_BRANCHES_CONFIG
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/ros2-release-branches/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("ros2-release-branches/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.ros2-release-branches/config.toml
        dirs::home_dir()
            .map(|home| home.join(".ros2-release-branches/config.toml"))
            .filter(|path| path.exists())
    }
}
