//! Source update ahead of the reinstall
//!
//! `--pull` runs the update program before the dependency directory is
//! touched; any failure aborts the run at that point.

use crate::context::OpsCtx;
use remod_errors::{Error, UpdateError};
use remod_events::{AppEvent, EventEmitter, FailureContext, UpdateEvent};
use std::path::Path;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;

const PULL_ARGS: &[&str] = &["pull", "--rebase=false"];

/// Pull source changes in `project_dir`
///
/// # Errors
///
/// Returns an error if the update program cannot be spawned or exits
/// nonzero.
pub async fn pull_source(ctx: &OpsCtx, project_dir: &Path) -> Result<(), Error> {
    let program = ctx.config.update.program.clone();
    let args: Vec<String> = PULL_ARGS.iter().map(|&arg| arg.to_owned()).collect();

    ctx.emit(AppEvent::Update(UpdateEvent::Started { args: args.clone() }));

    let start = Instant::now();
    let status = Command::new(&program)
        .args(&args)
        .current_dir(project_dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await;

    let status = match status {
        Ok(status) => status,
        Err(e) => {
            let error = UpdateError::SpawnFailed {
                message: e.to_string(),
            };
            ctx.emit(AppEvent::Update(UpdateEvent::Failed {
                failure: FailureContext::from_error(&error),
            }));
            return Err(error.into());
        }
    };

    if status.success() {
        ctx.emit(AppEvent::Update(UpdateEvent::Completed {
            duration: start.elapsed(),
        }));
        return Ok(());
    }

    let error = match status.code() {
        Some(code) => UpdateError::PullFailed { code },
        None => UpdateError::Terminated,
    };
    ctx.emit(AppEvent::Update(UpdateEvent::Failed {
        failure: FailureContext::from_error(&error),
    }));
    Err(error.into())
}
