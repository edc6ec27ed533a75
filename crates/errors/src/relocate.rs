//! Dependency directory relocation error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum RelocationError {
    #[error("failed to move {from} to {to}: {message}")]
    RenameFailed {
        from: String,
        to: String,
        message: String,
    },
}

impl UserFacingError for RelocationError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::RenameFailed { .. } => {
                Some("Close programs holding files open under the directory, or delete it manually.")
            }
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::RenameFailed { .. } => "relocate.rename_failed",
        };
        Some(code)
    }
}
