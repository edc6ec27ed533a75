//! Types for operations and results

use remod_errors::Error;
use remod_types::{InstallMode, TaskSummary};
use std::path::PathBuf;
use std::time::Duration;

/// Options for one overlapped reinstall run
#[derive(Clone, Debug)]
pub struct ReinstallRequest {
    /// Project root the installer runs in
    pub project_dir: PathBuf,
    /// Installer invocation mode
    pub mode: InstallMode,
    /// Pull source changes before touching the dependency directory
    pub pull: bool,
    /// Delete the lockfile before installing
    pub remove_lock_file: bool,
    /// Settle the installer leg as skipped without spawning anything
    pub skip_install: bool,
    /// Extra arguments forwarded to the installer
    pub installer_args: Vec<String>,
}

impl ReinstallRequest {
    /// Create a request with default options
    #[must_use]
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            mode: InstallMode::default(),
            pull: false,
            remove_lock_file: false,
            skip_install: false,
            installer_args: Vec::new(),
        }
    }

    /// Set the installer invocation mode
    #[must_use]
    pub fn with_mode(mut self, mode: InstallMode) -> Self {
        self.mode = mode;
        self
    }

    /// Pull source changes first
    #[must_use]
    pub fn with_pull(mut self, pull: bool) -> Self {
        self.pull = pull;
        self
    }

    /// Delete the lockfile before installing
    #[must_use]
    pub fn with_remove_lock_file(mut self, remove: bool) -> Self {
        self.remove_lock_file = remove;
        self
    }

    /// Skip the installer leg entirely
    #[must_use]
    pub fn with_skip_install(mut self, skip: bool) -> Self {
        self.skip_install = skip;
        self
    }

    /// Forward extra arguments to the installer
    #[must_use]
    pub fn with_installer_args(mut self, args: Vec<String>) -> Self {
        self.installer_args = args;
        self
    }
}

/// Where the dependency directory ended up before the concurrent phase
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelocationOutcome {
    /// Renamed to a scratch path; the reaper owns it now
    Moved { to: PathBuf },
    /// No directory existed
    Missing,
    /// Rename failed; the directory is still in place
    Failed,
}

/// Terminal state of one concurrent leg
#[derive(Clone, Debug)]
pub enum TaskOutcome {
    /// The leg ran to completion
    Completed { elapsed: Duration },
    /// Nothing to do
    Skipped,
    /// The leg ran and failed
    Failed { error: Error, elapsed: Duration },
}

impl TaskOutcome {
    /// Summarize for the run report
    #[must_use]
    pub fn to_summary(&self) -> TaskSummary {
        match self {
            Self::Completed { elapsed } => TaskSummary::completed(as_millis_u64(*elapsed)),
            Self::Skipped => TaskSummary::skipped(),
            Self::Failed { error, elapsed } => {
                TaskSummary::failed(error.to_string(), as_millis_u64(*elapsed))
            }
        }
    }
}

/// Clamp a duration to whole milliseconds for reporting
pub(crate) fn as_millis_u64(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
