use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Metrics domain events for savings accounting
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MetricsEvent {
    /// Overlap credit computed from the two settled tasks
    SavingsComputed {
        saved: Duration,
        removal: Duration,
        install: Duration,
    },

    /// Lifetime total written to the savings store
    TotalPersisted { total: Duration, path: PathBuf },

    /// Savings store reset to zero
    StoreCleared { path: PathBuf },
}
