//! Structured logging integration for events
//!
//! Converts domain events into tracing records with structured fields so
//! the same stream that drives the console also lands in the log files.

use remod_events::{
    AppEvent, CleanupEvent, GeneralEvent, InstallEvent, MetricsEvent, RelocateEvent, UpdateEvent,
};
use tracing::{debug, error, info, warn};

/// Log an `AppEvent` through tracing with fields matching its domain
pub fn log_event_with_tracing(event: &AppEvent) {
    let source = event.event_source();

    match event {
        // Update domain events (the git pull before the reinstall)
        AppEvent::Update(update_event) => match update_event {
            UpdateEvent::Started { args } => {
                info!(
                    source = source.as_str(),
                    args = ?args,
                    "Source update started"
                );
            }
            UpdateEvent::Completed { duration } => {
                info!(
                    source = source.as_str(),
                    duration_ms = duration.as_millis(),
                    "Source update completed"
                );
            }
            UpdateEvent::Failed { failure } => {
                error!(
                    source = source.as_str(),
                    retryable = failure.retryable,
                    code = ?failure.code,
                    message = %failure.message,
                    hint = ?failure.hint,
                    "Source update failed"
                );
            }
        },

        // Relocation domain events (the atomic rename)
        AppEvent::Relocate(relocate_event) => match relocate_event {
            RelocateEvent::Started { from, to } => {
                info!(
                    source = source.as_str(),
                    from = %from.display(),
                    to = %to.display(),
                    "Relocation started"
                );
            }
            RelocateEvent::Completed { from, to } => {
                info!(
                    source = source.as_str(),
                    from = %from.display(),
                    to = %to.display(),
                    "Relocation completed"
                );
            }
            RelocateEvent::Skipped { path } => {
                debug!(
                    source = source.as_str(),
                    path = %path.display(),
                    "Relocation skipped"
                );
            }
            RelocateEvent::Failed { from, failure } => {
                warn!(
                    source = source.as_str(),
                    from = %from.display(),
                    retryable = failure.retryable,
                    code = ?failure.code,
                    message = %failure.message,
                    hint = ?failure.hint,
                    "Relocation failed"
                );
            }
        },

        // Cleanup domain events (the background deletion)
        AppEvent::Cleanup(cleanup_event) => match cleanup_event {
            CleanupEvent::Started { path } => {
                info!(
                    source = source.as_str(),
                    path = %path.display(),
                    "Background deletion started"
                );
            }
            CleanupEvent::Completed { path, duration } => {
                info!(
                    source = source.as_str(),
                    path = %path.display(),
                    duration_ms = duration.as_millis(),
                    "Background deletion completed"
                );
            }
            CleanupEvent::Skipped => {
                info!(source = source.as_str(), "Background deletion skipped");
            }
            CleanupEvent::Failed { path, failure } => {
                warn!(
                    source = source.as_str(),
                    path = %path.display(),
                    retryable = failure.retryable,
                    code = ?failure.code,
                    message = %failure.message,
                    hint = ?failure.hint,
                    "Background deletion failed"
                );
            }
            CleanupEvent::StillRunning { path } => {
                info!(
                    source = source.as_str(),
                    path = %path.display(),
                    "Waiting for background deletion"
                );
            }
        },

        // Install domain events (the foreground installer)
        AppEvent::Install(install_event) => match install_event {
            InstallEvent::Started {
                program,
                args,
                mode,
            } => {
                info!(
                    source = source.as_str(),
                    program = %program,
                    args = ?args,
                    mode = ?mode,
                    "Install started"
                );
            }
            InstallEvent::Completed { program, duration } => {
                info!(
                    source = source.as_str(),
                    program = %program,
                    duration_ms = duration.as_millis(),
                    "Install completed"
                );
            }
            InstallEvent::Skipped => {
                info!(source = source.as_str(), "Install skipped");
            }
            InstallEvent::Failed { program, failure } => {
                error!(
                    source = source.as_str(),
                    program = %program,
                    retryable = failure.retryable,
                    code = ?failure.code,
                    message = %failure.message,
                    hint = ?failure.hint,
                    "Install failed"
                );
            }
        },

        // Metrics domain events (savings accounting)
        AppEvent::Metrics(metrics_event) => match metrics_event {
            MetricsEvent::SavingsComputed {
                saved,
                removal,
                install,
            } => {
                debug!(
                    source = source.as_str(),
                    saved_ms = saved.as_millis(),
                    removal_ms = removal.as_millis(),
                    install_ms = install.as_millis(),
                    "Savings computed"
                );
            }
            MetricsEvent::TotalPersisted { total, path } => {
                info!(
                    source = source.as_str(),
                    total_ms = total.as_millis(),
                    path = %path.display(),
                    "Savings total persisted"
                );
            }
            MetricsEvent::StoreCleared { path } => {
                info!(
                    source = source.as_str(),
                    path = %path.display(),
                    "Savings store cleared"
                );
            }
        },

        // General events
        AppEvent::General(general_event) => match general_event {
            GeneralEvent::Warning { message, context } => {
                warn!(
                    source = source.as_str(),
                    message = %message,
                    context = ?context,
                    "Warning"
                );
            }
            GeneralEvent::Error { message, details } => {
                error!(
                    source = source.as_str(),
                    message = %message,
                    details = ?details,
                    "Error"
                );
            }
            GeneralEvent::DebugLog { message, context } => {
                debug!(
                    source = source.as_str(),
                    message = %message,
                    context = ?context,
                    "Debug log"
                );
            }
            GeneralEvent::OperationStarted { operation } => {
                info!(
                    source = source.as_str(),
                    operation = %operation,
                    "Operation started"
                );
            }
            GeneralEvent::OperationCompleted { operation, success } => {
                info!(
                    source = source.as_str(),
                    operation = %operation,
                    success = success,
                    "Operation completed"
                );
            }
            GeneralEvent::OperationFailed { operation, error } => {
                error!(
                    source = source.as_str(),
                    operation = %operation,
                    error = %error,
                    "Operation failed"
                );
            }
        },
    }
}
