#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! High-level operations orchestration for remod
//!
//! This crate implements the overlapped reinstall: the dependency
//! directory is renamed out of the way, deleted in the background, and
//! the package installer runs concurrently in the freed path. The
//! savings store maintenance operations live here too.

mod cleanup;
mod context;
mod install;
mod maintenance;
mod reinstall;
mod relocate;
mod types;
mod update;

pub use context::{OpsContextBuilder, OpsCtx};
pub use maintenance::clear_savings;
pub use reinstall::reinstall;
pub use types::{ReinstallRequest, RelocationOutcome, TaskOutcome};

use remod_errors::Error;
use remod_types::ReinstallReport;

/// Operation result that can be serialized for CLI output
#[derive(Clone, Debug, serde::Serialize)]
#[serde(tag = "type", content = "data")]
pub enum OperationResult {
    /// Overlapped reinstall report
    Reinstall(ReinstallReport),
    /// Generic success message
    Success(String),
}

impl OperationResult {
    /// Convert to JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
