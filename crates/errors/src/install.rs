//! Package installer error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum InstallError {
    #[error("failed to launch {program}: {message}")]
    SpawnFailed { program: String, message: String },

    #[error("{program} exited with status {code}")]
    ExitFailure { program: String, code: i32 },

    #[error("{program} was terminated by a signal")]
    Terminated { program: String },
}

impl UserFacingError for InstallError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::SpawnFailed { .. } => {
                Some("Ensure the package installer is installed and on your PATH.")
            }
            Self::ExitFailure { .. } => {
                Some("Inspect the installer output above for the underlying failure.")
            }
            Self::Terminated { .. } => None,
        }
    }

    fn is_retryable(&self) -> bool {
        // Registry hiccups clear up on retry; a missing binary does not.
        matches!(self, Self::ExitFailure { .. })
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::SpawnFailed { .. } => "install.spawn_failed",
            Self::ExitFailure { .. } => "install.exit_failure",
            Self::Terminated { .. } => "install.terminated",
        };
        Some(code)
    }
}
