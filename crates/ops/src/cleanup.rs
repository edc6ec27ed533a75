//! Background deletion of the relocated dependency directory
//!
//! The reaper runs concurrently with the installer and never aborts the
//! run: a failed deletion of a scratch directory is reported as a
//! warning and the directory is left behind.

use crate::context::OpsCtx;
use crate::types::{RelocationOutcome, TaskOutcome};
use remod_errors::CleanupError;
use remod_events::{AppEvent, CleanupEvent, EventEmitter, EventSender, FailureContext};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::fs;
use tokio::task::{JoinError, JoinHandle};

/// Dispatch the background deletion for a relocation outcome
///
/// When nothing was relocated the leg settles as `Skipped` immediately.
pub fn spawn_reaper(ctx: &OpsCtx, relocation: &RelocationOutcome) -> JoinHandle<TaskOutcome> {
    let tx = ctx.tx.clone();
    match relocation {
        RelocationOutcome::Moved { to } => {
            let path = to.clone();
            tokio::spawn(async move { reap(&tx, path).await })
        }
        RelocationOutcome::Missing | RelocationOutcome::Failed => tokio::spawn(async move {
            tx.emit(AppEvent::Cleanup(CleanupEvent::Skipped));
            TaskOutcome::Skipped
        }),
    }
}

/// Fold the reaper's join result into a task outcome
pub(crate) fn settle(joined: Result<TaskOutcome, JoinError>) -> TaskOutcome {
    match joined {
        Ok(outcome) => outcome,
        Err(e) => TaskOutcome::Failed {
            error: CleanupError::TaskPanicked {
                message: e.to_string(),
            }
            .into(),
            elapsed: Duration::ZERO,
        },
    }
}

/// Delete the directory tree at `path`, timing the removal
async fn reap(tx: &EventSender, path: PathBuf) -> TaskOutcome {
    if let Err(e) = fs::metadata(&path).await {
        if e.kind() == std::io::ErrorKind::NotFound {
            tx.emit(AppEvent::Cleanup(CleanupEvent::Skipped));
            return TaskOutcome::Skipped;
        }
    }

    tx.emit(AppEvent::Cleanup(CleanupEvent::Started {
        path: path.clone(),
    }));
    let start = Instant::now();

    match fs::remove_dir_all(&path).await {
        Ok(()) => {
            let elapsed = start.elapsed();
            tx.emit(AppEvent::Cleanup(CleanupEvent::Completed {
                path,
                duration: elapsed,
            }));
            TaskOutcome::Completed { elapsed }
        }
        Err(e) => {
            let elapsed = start.elapsed();
            let error = CleanupError::RemoveFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            };
            tx.emit(AppEvent::Cleanup(CleanupEvent::Failed {
                path,
                failure: FailureContext::from_error(&error),
            }));
            TaskOutcome::Failed {
                error: error.into(),
                elapsed,
            }
        }
    }
}
