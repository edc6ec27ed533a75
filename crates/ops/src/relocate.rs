//! Dependency directory relocation
//!
//! Renames the existing dependency directory to a scratch path so the
//! installer can start writing a fresh tree immediately. The rename
//! settles before the concurrent phase begins; the scratch path is then
//! deleted in the background.

use crate::context::OpsCtx;
use crate::types::RelocationOutcome;
use remod_errors::RelocationError;
use remod_events::{AppEvent, EventEmitter, FailureContext, RelocateEvent};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::fs;

/// Move the dependency directory out of the way
///
/// A missing directory settles as `Missing`. A rename failure is
/// reported as a warning and settles as `Failed`; the run continues
/// with the directory in place.
pub async fn relocate(ctx: &OpsCtx, source: &Path) -> RelocationOutcome {
    if let Err(e) = fs::metadata(source).await {
        if e.kind() == std::io::ErrorKind::NotFound {
            ctx.emit(AppEvent::Relocate(RelocateEvent::Skipped {
                path: source.to_path_buf(),
            }));
            return RelocationOutcome::Missing;
        }
    }

    let temp_root = ctx.config.temp_dir();
    let destination = scratch_destination(&temp_root, source);

    ctx.emit(AppEvent::Relocate(RelocateEvent::Started {
        from: source.to_path_buf(),
        to: destination.clone(),
    }));

    // An absent temp root surfaces through the rename below.
    let _ = fs::create_dir_all(&temp_root).await;

    match fs::rename(source, &destination).await {
        Ok(()) => {
            ctx.emit(AppEvent::Relocate(RelocateEvent::Completed {
                from: source.to_path_buf(),
                to: destination.clone(),
            }));
            RelocationOutcome::Moved { to: destination }
        }
        Err(e) => {
            let error = RelocationError::RenameFailed {
                from: source.display().to_string(),
                to: destination.display().to_string(),
                message: e.to_string(),
            };
            ctx.emit(AppEvent::Relocate(RelocateEvent::Failed {
                from: source.to_path_buf(),
                failure: FailureContext::from_error(&error),
            }));
            RelocationOutcome::Failed
        }
    }
}

/// Scratch path for the relocated directory, unique per run
///
/// Uniqueness comes from a millisecond timestamp. Runs landing in the
/// same millisecond would collide; the rename then fails non-fatally.
fn scratch_destination(temp_root: &Path, source: &Path) -> PathBuf {
    let name = source.file_name().map_or_else(
        || "dependencies".to_string(),
        |n| n.to_string_lossy().into_owned(),
    );
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis());
    temp_root.join(format!("{name}_to_remove_{millis}"))
}
