use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Cleanup domain events for the background deletion of the relocated
/// dependency directory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CleanupEvent {
    /// Background deletion dispatched
    Started { path: PathBuf },

    /// Deletion finished while the run was still in flight
    Completed { path: PathBuf, duration: Duration },

    /// Nothing to delete; no directory was relocated
    Skipped,

    /// Deletion failed; the relocated directory is left behind
    Failed {
        path: PathBuf,
        failure: super::FailureContext,
    },

    /// Install finished first; the run is waiting on the deletion
    StillRunning { path: PathBuf },
}
