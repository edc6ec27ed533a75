//! Integration tests for events

#[cfg(test)]
mod tests {
    use remod_events::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_event_sender_ext() {
        let (tx, mut rx) = channel();

        // Test emit helpers
        tx.emit_error("test error");
        tx.emit_debug("test debug");

        let event1 = rx.recv().await.unwrap();
        assert!(matches!(
            event1,
            AppEvent::General(GeneralEvent::Error { .. })
        ));

        let event2 = rx.recv().await.unwrap();
        assert!(matches!(
            event2,
            AppEvent::General(GeneralEvent::DebugLog { .. })
        ));
    }

    #[tokio::test]
    async fn test_dropped_receiver() {
        let (tx, rx) = channel();
        drop(rx);

        // Should not panic when receiver is dropped
        tx.emit_warning("ignored");
    }

    #[test]
    fn test_app_event_serialization() {
        let event = AppEvent::Cleanup(CleanupEvent::StillRunning {
            path: "/tmp/node_modules_to_remove_1".into(),
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["domain"], "cleanup");
        assert_eq!(json["event"]["type"], "StillRunning");
    }

    #[test]
    fn test_log_levels_track_severity() {
        let failed = AppEvent::Cleanup(CleanupEvent::Failed {
            path: "/tmp/x".into(),
            failure: FailureContext::new(
                Some("cleanup.remove_failed"),
                "failed to remove /tmp/x",
                None::<String>,
                false,
            ),
        });
        // Cleanup failures are non-fatal and log as warnings
        assert_eq!(failed.log_level(), tracing::Level::WARN);

        let saved = AppEvent::Metrics(MetricsEvent::SavingsComputed {
            saved: Duration::from_millis(1500),
            removal: Duration::from_millis(1500),
            install: Duration::from_millis(4000),
        });
        assert_eq!(saved.log_level(), tracing::Level::DEBUG);
        assert_eq!(saved.event_source(), EventSource::METRICS);
    }
}
