//! Background deletion error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum CleanupError {
    #[error("failed to remove {path}: {message}")]
    RemoveFailed { path: String, message: String },

    #[error("background deletion task failed: {message}")]
    TaskPanicked { message: String },
}

impl UserFacingError for CleanupError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::RemoveFailed { .. } => Some("Delete the leftover directory manually."),
            Self::TaskPanicked { .. } => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::RemoveFailed { .. } => "cleanup.remove_failed",
            Self::TaskPanicked { .. } => "cleanup.task_panicked",
        };
        Some(code)
    }
}
