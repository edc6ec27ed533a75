#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for the remod reinstall orchestrator
//!
//! This crate provides fundamental types used throughout the system,
//! including install modes, task summaries, and report structures.

pub mod reports;

// Re-export commonly used types
pub use reports::{ReinstallReport, SavingsRecord, TaskStatus, TaskSummary};

use serde::{Deserialize, Serialize};

/// How the package installer rebuilds the dependency tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallMode {
    /// Resolve from the manifest (`npm i`), updating the lockfile as needed
    Incremental,
    /// Reproduce the lockfile exactly (`npm ci`), preferring the local cache
    Clean,
}

impl InstallMode {
    /// Arguments passed to the installer for this mode
    #[must_use]
    pub fn installer_args(self) -> &'static [&'static str] {
        match self {
            Self::Incremental => &["i"],
            Self::Clean => &["ci", "--prefer-offline"],
        }
    }
}

impl std::fmt::Display for InstallMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Incremental => write!(f, "incremental"),
            Self::Clean => write!(f, "clean"),
        }
    }
}

impl Default for InstallMode {
    fn default() -> Self {
        Self::Incremental
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    Always,
    Auto,
    Never,
}

// Implement clap::ValueEnum for ColorChoice
impl clap::ValueEnum for ColorChoice {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Always, Self::Auto, Self::Never]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::Always => clap::builder::PossibleValue::new("always"),
            Self::Auto => clap::builder::PossibleValue::new("auto"),
            Self::Never => clap::builder::PossibleValue::new("never"),
        })
    }
}

impl Default for ColorChoice {
    fn default() -> Self {
        Self::Auto
    }
}
