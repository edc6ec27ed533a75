//! Operations context for dependency injection

use remod_config::Config;
use remod_errors::Error;
use remod_events::{EventEmitter, EventSender};
use remod_store::MetricStore;

/// Operations context providing access to shared components
pub struct OpsCtx {
    /// Savings metric store
    pub store: MetricStore,
    /// Event sender for progress reporting
    pub tx: EventSender,
    /// System configuration
    pub config: Config,
}

impl EventEmitter for OpsCtx {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(&self.tx)
    }
}

/// Builder for operations context
pub struct OpsContextBuilder {
    store: Option<MetricStore>,
    tx: Option<EventSender>,
    config: Option<Config>,
}

impl OpsContextBuilder {
    /// Create new context builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: None,
            tx: None,
            config: None,
        }
    }

    /// Set metric store
    #[must_use]
    pub fn with_store(mut self, store: MetricStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Set event sender
    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    /// Set configuration
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the context
    ///
    /// # Errors
    ///
    /// Returns an error if any required component is missing.
    pub fn build(self) -> Result<OpsCtx, Error> {
        let store = self
            .store
            .ok_or_else(|| Error::internal("ops context missing component: store"))?;

        let tx = self
            .tx
            .ok_or_else(|| Error::internal("ops context missing component: event_sender"))?;

        let config = self
            .config
            .ok_or_else(|| Error::internal("ops context missing component: config"))?;

        Ok(OpsCtx { store, tx, config })
    }
}

impl Default for OpsContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
