//! Source update (git pull) error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum UpdateError {
    #[error("failed to launch git: {message}")]
    SpawnFailed { message: String },

    #[error("git pull exited with status {code}")]
    PullFailed { code: i32 },

    #[error("git pull was terminated by a signal")]
    Terminated,
}

impl UserFacingError for UpdateError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::SpawnFailed { .. } => Some("Ensure git is installed and on your PATH."),
            Self::PullFailed { .. } => {
                Some("Resolve the git failure (conflicts, auth, remote) and re-run.")
            }
            Self::Terminated => None,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, Self::PullFailed { .. })
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::SpawnFailed { .. } => "update.spawn_failed",
            Self::PullFailed { .. } => "update.pull_failed",
            Self::Terminated => "update.terminated",
        };
        Some(code)
    }
}
