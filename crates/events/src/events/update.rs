use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Update domain events for the git pull that precedes the reinstall
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UpdateEvent {
    /// Pull started
    Started { args: Vec<String> },

    /// Pull finished and the working tree is current
    Completed { duration: Duration },

    /// Pull failed; the run aborts
    Failed { failure: super::FailureContext },
}
