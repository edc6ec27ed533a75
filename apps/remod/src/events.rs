//! Event handling and console display

use console::style;
use remod_events::{
    AppEvent, CleanupEvent, GeneralEvent, InstallEvent, MetricsEvent, RelocateEvent, UpdateEvent,
};
use tracing::Level;

/// Event handler for console feedback during a run
pub struct EventHandler {
    /// Whether status lines may use color
    colors_enabled: bool,
    /// Suppress everything below error level
    quiet: bool,
    /// Also surface debug-level events
    debug: bool,
}

impl EventHandler {
    /// Create new event handler
    pub fn new(colors_enabled: bool, quiet: bool, debug: bool) -> Self {
        Self {
            colors_enabled,
            quiet,
            debug,
        }
    }

    /// Handle incoming event
    pub fn handle_event(&self, event: &AppEvent) {
        crate::logging::log_event_with_tracing(event);

        if !self.should_display(event) {
            return;
        }

        match event {
            // Update events
            AppEvent::Update(UpdateEvent::Started { .. }) => {
                self.show_status("🔄 Pulling latest changes");
            }
            AppEvent::Update(UpdateEvent::Completed { duration }) => {
                self.show_status(&format!(
                    "✅ Pulled latest changes ({}ms)",
                    duration.as_millis()
                ));
            }
            AppEvent::Update(UpdateEvent::Failed { failure }) => {
                self.show_error(&format!("❌ Pull failed: {}", failure.message));
            }

            // Relocation events
            AppEvent::Relocate(RelocateEvent::Started { from, .. }) => {
                self.show_status(&format!("📦 Moving {} aside", from.display()));
            }
            AppEvent::Relocate(RelocateEvent::Completed { from, to }) => {
                self.show_status(&format!("✅ Moved {} → {}", from.display(), to.display()));
            }
            AppEvent::Relocate(RelocateEvent::Skipped { path }) => {
                self.show_status(&format!("ℹ️  Nothing to remove at {}", path.display()));
            }
            AppEvent::Relocate(RelocateEvent::Failed { from, failure }) => {
                self.show_status(&format!(
                    "⚠️  Could not move {}: {}",
                    from.display(),
                    failure.message
                ));
            }

            // Cleanup events
            AppEvent::Cleanup(CleanupEvent::Started { path }) => {
                self.show_status(&format!("🧹 Removing {} in the background", path.display()));
            }
            AppEvent::Cleanup(CleanupEvent::Completed { duration, .. }) => {
                self.show_status(&format!(
                    "✅ Removed old dependencies ({}ms)",
                    duration.as_millis()
                ));
            }
            AppEvent::Cleanup(CleanupEvent::Skipped) => {
                self.show_status("ℹ️  Nothing to remove");
            }
            AppEvent::Cleanup(CleanupEvent::Failed { path, failure }) => {
                self.show_status(&format!(
                    "⚠️  Background removal failed for {}: {}",
                    path.display(),
                    failure.message
                ));
            }
            AppEvent::Cleanup(CleanupEvent::StillRunning { .. }) => {
                self.show_status("🧹 Waiting for background removal to finish");
            }

            // Install events
            AppEvent::Install(InstallEvent::Started { program, args, .. }) => {
                self.show_status(&format!("📦 Running {} {}", program, args.join(" ")));
            }
            AppEvent::Install(InstallEvent::Completed { program, duration }) => {
                self.show_status(&format!(
                    "✅ {} finished ({}ms)",
                    program,
                    duration.as_millis()
                ));
            }
            AppEvent::Install(InstallEvent::Skipped) => {
                self.show_status("ℹ️  Skipping install");
            }
            AppEvent::Install(InstallEvent::Failed { program, failure }) => {
                self.show_error(&format!("❌ {} failed: {}", program, failure.message));
            }

            // Metrics events
            AppEvent::Metrics(MetricsEvent::SavingsComputed {
                saved,
                removal,
                install,
            }) => {
                self.show_status(&format!(
                    "🔍 Saved {}ms this run (removal {}ms, install {}ms)",
                    saved.as_millis(),
                    removal.as_millis(),
                    install.as_millis()
                ));
            }

            // General events
            AppEvent::General(GeneralEvent::Warning { message, .. }) => {
                self.show_status(&format!("⚠️  {message}"));
            }
            AppEvent::General(GeneralEvent::Error { message, details }) => {
                if let Some(details) = details {
                    self.show_error(&format!("❌ {message}: {details}"));
                } else {
                    self.show_error(&format!("❌ {message}"));
                }
            }
            AppEvent::General(GeneralEvent::DebugLog { message, .. }) => {
                self.show_status(&format!("🔍 {message}"));
            }
            AppEvent::General(GeneralEvent::OperationStarted { operation }) => {
                self.show_status(&format!("🔄 {operation}"));
            }
            AppEvent::General(GeneralEvent::OperationFailed { operation, error }) => {
                self.show_error(&format!("❌ {operation} failed: {error}"));
            }

            // Catch-all for events without a console line; they still reach
            // the log files above
            _ => {}
        }
    }

    /// Decide whether an event earns a console line at the current verbosity
    fn should_display(&self, event: &AppEvent) -> bool {
        let level = event.log_level();
        if self.quiet {
            return level <= Level::ERROR;
        }
        if self.debug {
            return true;
        }
        level <= Level::INFO
    }

    /// Show status message
    fn show_status(&self, message: &str) {
        println!("{message}");
    }

    /// Show error message
    fn show_error(&self, message: &str) {
        if self.colors_enabled {
            eprintln!("{}", style(message).red());
        } else {
            eprintln!("{message}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use remod_events::FailureContext;

    fn install_failed() -> AppEvent {
        AppEvent::Install(InstallEvent::Failed {
            program: "npm".to_string(),
            failure: FailureContext::new(None::<String>, "boom", None::<String>, false),
        })
    }

    #[test]
    fn handler_displays_basic_events_without_panicking() {
        let handler = EventHandler::new(false, false, false);

        handler.handle_event(&AppEvent::Install(InstallEvent::Started {
            program: "npm".to_string(),
            args: vec!["ci".to_string()],
            mode: remod_types::InstallMode::Clean,
        }));
        handler.handle_event(&AppEvent::Cleanup(CleanupEvent::Skipped));
        handler.handle_event(&install_failed());

        // Verify no panics occur
    }

    #[test]
    fn quiet_handler_only_passes_errors() {
        let handler = EventHandler::new(false, true, false);

        assert!(!handler.should_display(&AppEvent::Install(InstallEvent::Skipped)));
        assert!(!handler.should_display(&AppEvent::General(GeneralEvent::warning("slow disk"))));
        assert!(handler.should_display(&install_failed()));
    }

    #[test]
    fn debug_handler_passes_debug_events() {
        let debug_handler = EventHandler::new(false, false, true);
        let default_handler = EventHandler::new(false, false, false);
        let event = AppEvent::General(GeneralEvent::debug("scratch path chosen"));

        assert!(debug_handler.should_display(&event));
        assert!(!default_handler.should_display(&event));
    }
}
