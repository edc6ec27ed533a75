use remod_types::InstallMode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Install domain events for the foreground package installer run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InstallEvent {
    /// Installer process spawned
    Started {
        program: String,
        args: Vec<String>,
        mode: InstallMode,
    },

    /// Installer exited successfully
    Completed { program: String, duration: Duration },

    /// Install was skipped on request
    Skipped,

    /// Installer failed to launch or exited nonzero
    Failed {
        program: String,
        failure: super::FailureContext,
    },
}
