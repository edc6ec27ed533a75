//! Report type definitions for operations

use serde::{Deserialize, Serialize};

/// Terminal state of one concurrent task
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TaskStatus {
    /// The task ran to completion
    Completed,
    /// The task had nothing to do and finished immediately
    Skipped,
    /// The task ran and failed; the run itself continued
    Failed { message: String },
}

impl TaskStatus {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Outcome and wall-clock time of one concurrent task
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    /// How the task ended
    pub status: TaskStatus,
    /// Wall-clock time from dispatch to settling; zero for skipped tasks
    pub elapsed_ms: u64,
}

impl TaskSummary {
    #[must_use]
    pub fn completed(elapsed_ms: u64) -> Self {
        Self {
            status: TaskStatus::Completed,
            elapsed_ms,
        }
    }

    #[must_use]
    pub fn skipped() -> Self {
        Self {
            status: TaskStatus::Skipped,
            elapsed_ms: 0,
        }
    }

    #[must_use]
    pub fn failed(message: impl Into<String>, elapsed_ms: u64) -> Self {
        Self {
            status: TaskStatus::Failed {
                message: message.into(),
            },
            elapsed_ms,
        }
    }
}

/// Reinstall report
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReinstallReport {
    /// Background deletion of the relocated dependency directory
    pub removal: TaskSummary,
    /// Foreground package installer run
    pub install: TaskSummary,
    /// Time saved by overlapping deletion with the install
    pub time_saved_ms: u64,
    /// Accumulated savings after this run; absent when nothing was credited
    pub total_saved_ms: Option<u64>,
    /// Total execution time
    pub duration_ms: u64,
}

impl ReinstallReport {
    /// Time saved is bounded by whichever of the two tasks finished first.
    ///
    /// Only two completed tasks overlap; a skipped or failed task saved
    /// nothing, so the credit floors at zero.
    #[must_use]
    pub fn compute_time_saved(removal: &TaskSummary, install: &TaskSummary) -> u64 {
        if removal.status.is_completed() && install.status.is_completed() {
            removal.elapsed_ms.min(install.elapsed_ms)
        } else {
            0
        }
    }
}

/// Durable record of accumulated savings
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsRecord {
    /// Lifetime total across runs, in milliseconds
    pub total_time_saved_ms: u64,
}
