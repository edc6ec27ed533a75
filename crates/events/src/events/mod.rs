use serde::{Deserialize, Serialize};

use crate::EventSource;
use remod_errors::UserFacingError;

/// Structured failure information shared across domains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureContext {
    /// Optional stable error code once taxonomy lands.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Short user-facing message.
    pub message: String,
    /// Optional remediation hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether retrying the operation might succeed.
    pub retryable: bool,
}

impl FailureContext {
    /// Construct a new failure context.
    #[must_use]
    pub fn new(
        code: Option<impl Into<String>>,
        message: impl Into<String>,
        hint: Option<impl Into<String>>,
        retryable: bool,
    ) -> Self {
        Self {
            code: code.map(Into::into),
            message: message.into(),
            hint: hint.map(Into::into),
            retryable,
        }
    }

    /// Build failure context from a `UserFacingError` implementation.
    #[must_use]
    pub fn from_error<E: UserFacingError + ?Sized>(error: &E) -> Self {
        Self::new(
            error.user_code(),
            error.user_message().into_owned(),
            error.user_hint(),
            error.is_retryable(),
        )
    }
}

// Declare all domain modules
pub mod cleanup;
pub mod general;
pub mod install;
pub mod metrics;
pub mod relocate;
pub mod update;

// Re-export all domain events
pub use cleanup::*;
pub use general::*;
pub use install::*;
pub use metrics::*;
pub use relocate::*;
pub use update::*;

/// Top-level application event enum that aggregates all domain-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// General utility events (warnings, errors, operations)
    General(GeneralEvent),

    /// Source update events (git pull before the reinstall)
    Update(UpdateEvent),

    /// Dependency directory relocation events (the atomic rename)
    Relocate(RelocateEvent),

    /// Background deletion events (reaping the relocated directory)
    Cleanup(CleanupEvent),

    /// Package installer events (the foreground install)
    Install(InstallEvent),

    /// Savings accounting events (computation and persistence)
    Metrics(MetricsEvent),
}

impl AppEvent {
    /// Identify the source domain for this event (used for metadata/logging).
    #[must_use]
    pub fn event_source(&self) -> EventSource {
        match self {
            Self::General(_) => EventSource::GENERAL,
            Self::Update(_) => EventSource::UPDATE,
            Self::Relocate(_) => EventSource::RELOCATE,
            Self::Cleanup(_) => EventSource::CLEANUP,
            Self::Install(_) => EventSource::INSTALL,
            Self::Metrics(_) => EventSource::METRICS,
        }
    }

    /// Determine the appropriate tracing log level for this event
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        use tracing::Level;

        match self {
            // Error-level events
            Self::General(GeneralEvent::Error { .. } | GeneralEvent::OperationFailed { .. })
            | Self::Update(UpdateEvent::Failed { .. })
            | Self::Install(InstallEvent::Failed { .. }) => Level::ERROR,

            // Warning-level events; relocation and cleanup failures do not
            // abort the run, so they surface as warnings
            Self::General(GeneralEvent::Warning { .. })
            | Self::Relocate(RelocateEvent::Failed { .. })
            | Self::Cleanup(CleanupEvent::Failed { .. }) => Level::WARN,

            // Debug-level events (internal state)
            Self::General(GeneralEvent::DebugLog { .. })
            | Self::Relocate(RelocateEvent::Skipped { .. })
            | Self::Metrics(MetricsEvent::SavingsComputed { .. }) => Level::DEBUG,

            // Default to INFO for most events
            _ => Level::INFO,
        }
    }

    /// Get the log target for this event (for structured logging)
    #[must_use]
    pub fn log_target(&self) -> &'static str {
        match self {
            Self::General(_) => "remod::events::general",
            Self::Update(_) => "remod::events::update",
            Self::Relocate(_) => "remod::events::relocate",
            Self::Cleanup(_) => "remod::events::cleanup",
            Self::Install(_) => "remod::events::install",
            Self::Metrics(_) => "remod::events::metrics",
        }
    }

    /// Get structured fields for logging (simplified for now)
    #[must_use]
    pub fn log_fields(&self) -> String {
        format!("{self:?}")
    }
}
