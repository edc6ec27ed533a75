//! Savings store error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum StoreError {
    #[error("home directory could not be determined")]
    HomeDirectoryNotFound,

    #[error("failed to read store file {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("failed to write store file {path}: {message}")]
    WriteFailed { path: String, message: String },

    #[error("store file {path} is corrupt: {message}")]
    ParseFailed { path: String, message: String },

    #[error("failed to clear store file {path}: {message}")]
    ClearFailed { path: String, message: String },
}

impl UserFacingError for StoreError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::HomeDirectoryNotFound => {
                Some("Set the store path explicitly via REMOD_STORE_PATH or the config file.")
            }
            Self::ParseFailed { .. } => {
                Some("The savings file is damaged; run `remod --clear-cache` to reset it.")
            }
            Self::WriteFailed { .. } | Self::ClearFailed { .. } => {
                Some("Ensure the store path is writable and retry.")
            }
            _ => None,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ReadFailed { .. } | Self::WriteFailed { .. } | Self::ClearFailed { .. }
        )
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::HomeDirectoryNotFound => "store.home_directory_not_found",
            Self::ReadFailed { .. } => "store.read_failed",
            Self::WriteFailed { .. } => "store.write_failed",
            Self::ParseFailed { .. } => "store.parse_failed",
            Self::ClearFailed { .. } => "store.clear_failed",
        };
        Some(code)
    }
}
