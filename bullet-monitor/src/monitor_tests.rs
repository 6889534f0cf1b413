//! Unit tests for monitor orchestration

#[cfg(test)]
mod tests {
    use super::super::config::MonitorConfig;
    use super::super::monitor::*;
    use super::super::suggest::{
        REASON_EQUALITY_FILTER, REASON_PIPELINE_MATCH, REASON_SORT_SCAN,
    };
    use mongobullet_protocol::{CommandEvent, CommandStartedEvent, CommandSucceededEvent};
    use serde_json::json;
    use tokio::sync::mpsc;

    fn monitor() -> SlowQueryMonitor {
        SlowQueryMonitor::new(MonitorConfig::default())
    }

    fn started(request_id: i64, name: &str, command: serde_json::Value) -> CommandStartedEvent {
        CommandStartedEvent {
            request_id,
            command_name: name.to_string(),
            command,
        }
    }

    fn succeeded(request_id: i64, duration: u64) -> CommandSucceededEvent {
        CommandSucceededEvent {
            request_id,
            duration,
        }
    }

    #[test]
    fn test_slow_find_is_reported() {
        let mut monitor = monitor();
        monitor.handle_started(&started(1, "find", json!({ "find": "users", "filter": { "age": 30 } })));

        let report = monitor.handle_succeeded(&succeeded(1, 150)).unwrap();
        assert_eq!(report.record_type, "SLOW_QUERY");
        assert_eq!(report.collection, "users");
        assert_eq!(report.duration, "150ms");
        assert_eq!(report.suggested_indexes.len(), 1);
        assert_eq!(report.suggested_indexes[0].field, "age");
        assert_eq!(report.suggested_indexes[0].reason, REASON_EQUALITY_FILTER);
    }

    #[test]
    fn test_fast_command_is_not_reported() {
        let mut monitor = monitor();
        monitor.handle_started(&started(1, "find", json!({ "find": "users", "filter": { "age": 30 } })));

        assert!(monitor.handle_succeeded(&succeeded(1, 50)).is_none());
        assert_eq!(monitor.pending_len(), 0);
    }

    #[test]
    fn test_duration_exactly_at_threshold_is_reported() {
        let mut monitor = monitor();
        monitor.handle_started(&started(1, "find", json!({ "find": "users" })));

        assert!(monitor.handle_succeeded(&succeeded(1, 100)).is_some());
    }

    #[test]
    fn test_aggregate_pipeline_report_shape() {
        let mut monitor = monitor();
        monitor.handle_started(&started(
            2,
            "aggregate",
            json!({
                "aggregate": "orders",
                "pipeline": [
                    { "$match": { "status": "open" } },
                    { "$sort": { "createdAt": -1 } },
                ],
            }),
        ));

        let report = monitor.handle_succeeded(&succeeded(2, 200)).unwrap();
        let suggestions = &report.suggested_indexes;
        assert_eq!(suggestions.len(), 3);
        assert_eq!(suggestions[0].field, "status");
        assert_eq!(suggestions[0].reason, REASON_EQUALITY_FILTER);
        assert_eq!(suggestions[1].field, "createdAt");
        assert_eq!(suggestions[1].reason, REASON_SORT_SCAN);
        assert_eq!(suggestions[2].field, "status");
        assert_eq!(suggestions[2].reason, REASON_PIPELINE_MATCH);
    }

    #[test]
    fn test_repeated_signature_is_suppressed() {
        let mut monitor = monitor();
        for request_id in [1, 2] {
            monitor.handle_started(&started(
                request_id,
                "find",
                json!({ "find": "users", "filter": { "age": 30 } }),
            ));
        }

        assert!(monitor.handle_succeeded(&succeeded(1, 150)).is_some());
        assert!(monitor.handle_succeeded(&succeeded(2, 150)).is_none());
        assert_eq!(monitor.reported_len(), 1);
    }

    #[test]
    fn test_same_shape_different_duration_reports_again() {
        let mut monitor = monitor();
        for request_id in [1, 2] {
            monitor.handle_started(&started(request_id, "find", json!({ "find": "users" })));
        }

        assert!(monitor.handle_succeeded(&succeeded(1, 150)).is_some());
        assert!(monitor.handle_succeeded(&succeeded(2, 151)).is_some());
        assert_eq!(monitor.reported_len(), 2);
    }

    #[test]
    fn test_unmatched_completion_is_ignored() {
        let mut monitor = monitor();
        assert!(monitor.handle_succeeded(&succeeded(99, 500)).is_none());
    }

    #[test]
    fn test_untracked_command_is_never_pending() {
        let mut monitor = monitor();
        monitor.handle_started(&started(1, "insert", json!({ "insert": "users" })));

        assert_eq!(monitor.pending_len(), 0);
        assert!(monitor.handle_succeeded(&succeeded(1, 500)).is_none());
    }

    #[test]
    fn test_interleaved_lifecycles_correlate_by_request_id() {
        let mut monitor = monitor();
        monitor.handle_started(&started(1, "find", json!({ "find": "users" })));
        monitor.handle_started(&started(2, "find", json!({ "find": "orders" })));

        let report = monitor.handle_succeeded(&succeeded(2, 300)).unwrap();
        assert_eq!(report.collection, "orders");
        let report = monitor.handle_succeeded(&succeeded(1, 300)).unwrap();
        assert_eq!(report.collection, "users");
    }

    #[test]
    fn test_unterminated_command_stays_pending() {
        let mut monitor = monitor();
        monitor.handle_started(&started(1, "find", json!({ "find": "users" })));
        monitor.handle_started(&started(2, "find", json!({ "find": "orders" })));
        monitor.handle_succeeded(&succeeded(1, 10));

        assert_eq!(monitor.pending_len(), 1);
    }

    #[test]
    fn test_report_serializes_to_wire_shape() {
        let mut monitor = monitor();
        monitor.handle_started(&started(1, "find", json!({ "find": "users", "filter": { "age": 30 } })));

        let report = monitor.handle_succeeded(&succeeded(1, 150)).unwrap();
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["type"], "SLOW_QUERY");
        assert_eq!(value["collection"], "users");
        assert_eq!(value["command"], "find");
        assert_eq!(value["duration"], "150ms");
        assert_eq!(value["suggestedIndexes"][0]["field"], "age");
    }

    #[tokio::test]
    async fn test_run_consumes_stream_until_close() {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(SlowQueryMonitor::new(MonitorConfig::default()).run(rx));

        tx.send(started(1, "find", json!({ "find": "users", "filter": { "age": 30 } })).into())
            .unwrap();
        tx.send(succeeded(1, 150).into()).unwrap();
        tx.send(CommandEvent::from(started(2, "find", json!({ "find": "users" }))))
            .unwrap();
        drop(tx);

        let monitor = handle.await.unwrap();
        assert_eq!(monitor.reported_len(), 1);
        assert_eq!(monitor.pending_len(), 1);
    }
}
