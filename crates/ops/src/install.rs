//! Package installer invocation
//!
//! The installer runs as a child process with inherited standard
//! streams so its own progress output reaches the user directly.

use crate::context::OpsCtx;
use crate::types::{ReinstallRequest, TaskOutcome};
use remod_errors::InstallError;
use remod_events::{AppEvent, EventEmitter, FailureContext, InstallEvent};
use remod_types::InstallMode;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;

/// Run the package installer to completion
///
/// Settles as `Skipped` without spawning anything when the request asks
/// for it. A spawn failure or a nonzero exit settles as `Failed`, which
/// the orchestrator treats as fatal once both legs have settled.
pub async fn run_installer(ctx: &OpsCtx, request: &ReinstallRequest) -> TaskOutcome {
    if request.skip_install {
        ctx.emit(AppEvent::Install(InstallEvent::Skipped));
        return TaskOutcome::Skipped;
    }

    let program = ctx.config.installer.program.clone();
    let args = installer_invocation(request.mode, &request.installer_args);

    ctx.emit(AppEvent::Install(InstallEvent::Started {
        program: program.clone(),
        args: args.clone(),
        mode: request.mode,
    }));

    let start = Instant::now();
    let spawned = Command::new(&program)
        .args(&args)
        .current_dir(&request.project_dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn();

    let mut child = match spawned {
        Ok(child) => child,
        Err(e) => {
            let error = InstallError::SpawnFailed {
                program: program.clone(),
                message: e.to_string(),
            };
            return fail(ctx, program, start, error);
        }
    };

    match child.wait().await {
        Ok(status) if status.success() => {
            let elapsed = start.elapsed();
            ctx.emit(AppEvent::Install(InstallEvent::Completed {
                program,
                duration: elapsed,
            }));
            TaskOutcome::Completed { elapsed }
        }
        Ok(status) => {
            let error = match status.code() {
                Some(code) => InstallError::ExitFailure {
                    program: program.clone(),
                    code,
                },
                None => InstallError::Terminated {
                    program: program.clone(),
                },
            };
            fail(ctx, program, start, error)
        }
        Err(e) => {
            let error = InstallError::SpawnFailed {
                program: program.clone(),
                message: e.to_string(),
            };
            fail(ctx, program, start, error)
        }
    }
}

fn fail(ctx: &OpsCtx, program: String, start: Instant, error: InstallError) -> TaskOutcome {
    ctx.emit(AppEvent::Install(InstallEvent::Failed {
        program,
        failure: FailureContext::from_error(&error),
    }));
    TaskOutcome::Failed {
        error: error.into(),
        elapsed: start.elapsed(),
    }
}

/// Build the installer argument list for a mode
///
/// Passthrough arguments ride along only in incremental mode; clean
/// installs always run with their fixed invocation.
fn installer_invocation(mode: InstallMode, passthrough: &[String]) -> Vec<String> {
    let mut args: Vec<String> = mode
        .installer_args()
        .iter()
        .map(|&arg| arg.to_owned())
        .collect();
    if mode == InstallMode::Incremental {
        args.extend(passthrough.iter().cloned());
    }
    args
}
