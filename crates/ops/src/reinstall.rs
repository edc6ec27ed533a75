//! Overlapped reinstall orchestration
//!
//! Ordering contract: the rename settles before either leg is
//! dispatched, the two legs settle independently (one failing never
//! cancels the other), and the savings store is touched only after both
//! have settled and the installer leg is known good.

use crate::cleanup;
use crate::context::OpsCtx;
use crate::install;
use crate::relocate;
use crate::types::{as_millis_u64, ReinstallRequest, RelocationOutcome, TaskOutcome};
use crate::update;
use remod_errors::Error;
use remod_events::{AppEvent, CleanupEvent, EventEmitter, MetricsEvent};
use remod_types::ReinstallReport;
use std::time::{Duration, Instant};

/// Run the overlapped reinstall
///
/// # Errors
///
/// Returns an error if the requested pull fails, the lockfile cannot be
/// removed, the installer fails, or recording the savings fails.
/// Relocation and cleanup failures surface as warnings and do not abort
/// the run.
pub async fn reinstall(ctx: &OpsCtx, request: &ReinstallRequest) -> Result<ReinstallReport, Error> {
    let start = Instant::now();

    if request.pull {
        update::pull_source(ctx, &request.project_dir).await?;
    }

    if request.remove_lock_file {
        remove_lockfile(ctx, request).await?;
    }

    let dependency_dir = request.project_dir.join(ctx.config.dependency_dir());
    let relocation = relocate::relocate(ctx, &dependency_dir).await;

    // Reaper first, installer second: the deletion is already scheduled
    // when the installer starts filling the freed path.
    let reaper = cleanup::spawn_reaper(ctx, &relocation);
    let install_outcome = install::run_installer(ctx, request).await;

    if let RelocationOutcome::Moved { to } = &relocation {
        if !reaper.is_finished() {
            ctx.emit(AppEvent::Cleanup(CleanupEvent::StillRunning {
                path: to.clone(),
            }));
        }
    }
    let removal_outcome = cleanup::settle(reaper.await);

    let removal = removal_outcome.to_summary();
    let install = install_outcome.to_summary();

    // The installer's failure is authoritative; the cleanup outcome has
    // already been reported and is discarded with it.
    if let TaskOutcome::Failed { error, .. } = install_outcome {
        return Err(error);
    }

    // Wall clock for the run itself; persisting the total is bookkeeping
    // and stays outside it.
    let duration_ms = as_millis_u64(start.elapsed());

    let time_saved_ms = ReinstallReport::compute_time_saved(&removal, &install);
    ctx.emit(AppEvent::Metrics(MetricsEvent::SavingsComputed {
        saved: Duration::from_millis(time_saved_ms),
        removal: Duration::from_millis(removal.elapsed_ms),
        install: Duration::from_millis(install.elapsed_ms),
    }));

    let total_saved_ms = if time_saved_ms > 0 {
        let total = ctx.store.add_saved_ms(time_saved_ms).await?;
        ctx.emit(AppEvent::Metrics(MetricsEvent::TotalPersisted {
            total: Duration::from_millis(total),
            path: ctx.store.path().to_path_buf(),
        }));
        Some(total)
    } else {
        None
    };

    Ok(ReinstallReport {
        removal,
        install,
        time_saved_ms,
        total_saved_ms,
        duration_ms,
    })
}

/// Delete the lockfile ahead of the install
///
/// A missing lockfile is a no-op; any other unlink failure aborts
/// before the installer starts.
async fn remove_lockfile(ctx: &OpsCtx, request: &ReinstallRequest) -> Result<(), Error> {
    let path = request.project_dir.join(&ctx.config.installer.lockfile);
    match tokio::fs::remove_file(&path).await {
        Ok(()) => {
            ctx.emit_debug(format!("removed lockfile {}", path.display()));
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            ctx.emit_debug(format!("no lockfile at {}", path.display()));
            Ok(())
        }
        Err(e) => Err(Error::io_with_path(&e, path)),
    }
}
