use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Relocation domain events for the atomic rename that frees the
/// dependency directory name before the install starts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RelocateEvent {
    /// Rename attempt started
    Started { from: PathBuf, to: PathBuf },

    /// Directory moved out of the way
    Completed { from: PathBuf, to: PathBuf },

    /// Nothing to relocate; the directory does not exist
    Skipped { path: PathBuf },

    /// Rename failed; the run continues with the directory in place
    Failed {
        from: PathBuf,
        failure: super::FailureContext,
    },
}
