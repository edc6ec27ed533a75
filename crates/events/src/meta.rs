use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Component/feature that originated the event.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub struct EventSource(Cow<'static, str>);

impl EventSource {
    pub const GENERAL: Self = Self::const_str("general");
    pub const UPDATE: Self = Self::const_str("update");
    pub const RELOCATE: Self = Self::const_str("relocate");
    pub const CLEANUP: Self = Self::const_str("cleanup");
    pub const INSTALL: Self = Self::const_str("install");
    pub const METRICS: Self = Self::const_str("metrics");

    const fn const_str(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }

    /// Create a source value from any stringy input (e.g. crate path).
    #[must_use]
    pub fn from_dynamic(value: impl Into<String>) -> Self {
        let value = value.into();
        Self(Cow::Owned(value))
    }

    /// Borrow the underlying identifier used for logging/telemetry.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for EventSource {
    fn from(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }
}

impl From<String> for EventSource {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}
