#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for remod
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/remod/config.toml)
//! - Environment variables
//! - CLI flags

use remod_errors::{ConfigError, Error};
use remod_types::ColorChoice;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub installer: InstallerConfig,

    #[serde(default)]
    pub update: UpdateConfig,

    #[serde(default)]
    pub paths: PathConfig,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_color_choice")]
    pub color: ColorChoice,
    #[serde(default)]
    pub quiet: bool,
}

/// Package installer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallerConfig {
    /// Program invoked to rebuild the dependency tree
    #[serde(default = "default_installer_program")]
    pub program: String,
    /// Lockfile consulted by clean installs and `--remove-lock-file`
    #[serde(default = "default_lockfile")]
    pub lockfile: String,
}

/// Source update configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateConfig {
    /// Program invoked for `--pull`
    #[serde(default = "default_update_program")]
    pub program: String,
}

/// Path configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Dependency directory to reinstall; `node_modules` when unset
    pub dependency_dir: Option<PathBuf>,
    /// Where relocated directories are parked before deletion
    pub temp_dir: Option<PathBuf>,
    /// Savings store file; `~/.remod` when unset
    pub store_path: Option<PathBuf>,
}

// Default implementations

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            color: ColorChoice::Auto,
            quiet: false,
        }
    }
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            program: default_installer_program(),
            lockfile: default_lockfile(),
        }
    }
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            program: default_update_program(),
        }
    }
}

// Default value functions for serde

fn default_color_choice() -> ColorChoice {
    ColorChoice::Auto
}

fn default_installer_program() -> String {
    "npm".to_string()
}

fn default_lockfile() -> String {
    "package-lock.json".to_string()
}

fn default_update_program() -> String {
    "git".to_string()
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join("remod").join("config.toml"))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })
            .map_err(Into::into)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Self::default_path()?;

        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// If path is provided, loads from that file.
    /// If path is None, uses the default loading behavior.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: &Option<std::path::PathBuf>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        // REMOD_COLOR
        if let Ok(color) = std::env::var("REMOD_COLOR") {
            self.general.color = match color.as_str() {
                "always" => ColorChoice::Always,
                "auto" => ColorChoice::Auto,
                "never" => ColorChoice::Never,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "REMOD_COLOR".to_string(),
                        value: color,
                    }
                    .into())
                }
            };
        }

        // REMOD_QUIET
        if let Ok(quiet) = std::env::var("REMOD_QUIET") {
            self.general.quiet = match quiet.as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "REMOD_QUIET".to_string(),
                        value: quiet,
                    }
                    .into())
                }
            };
        }

        // REMOD_INSTALLER
        if let Ok(program) = std::env::var("REMOD_INSTALLER") {
            if program.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "REMOD_INSTALLER".to_string(),
                    value: program,
                }
                .into());
            }
            self.installer.program = program;
        }

        // REMOD_DEPENDENCY_DIR
        if let Ok(dir) = std::env::var("REMOD_DEPENDENCY_DIR") {
            self.paths.dependency_dir = Some(PathBuf::from(dir));
        }

        // REMOD_TEMP_DIR
        if let Ok(dir) = std::env::var("REMOD_TEMP_DIR") {
            self.paths.temp_dir = Some(PathBuf::from(dir));
        }

        // REMOD_STORE_PATH
        if let Ok(path) = std::env::var("REMOD_STORE_PATH") {
            self.paths.store_path = Some(PathBuf::from(path));
        }

        Ok(())
    }

    /// Get the dependency directory (with default)
    #[must_use]
    pub fn dependency_dir(&self) -> PathBuf {
        self.paths
            .dependency_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("node_modules"))
    }

    /// Get the parking directory for relocated trees (with default)
    #[must_use]
    pub fn temp_dir(&self) -> PathBuf {
        self.paths
            .temp_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }

    /// Get the savings store path, if one was configured
    ///
    /// `None` lets the store fall back to its home-directory default.
    #[must_use]
    pub fn store_path(&self) -> Option<PathBuf> {
        self.paths.store_path.clone()
    }
}
