//! End-to-end slow query scenarios, driven the way a driver connection would

use crate::test_utils::*;
use anyhow::Result;
use mongobullet_monitor::{MonitorConfig, SlowQueryMonitor};
use mongobullet_protocol::{CommandEvent, CommandStartedEvent, CommandSucceededEvent};
use serde_json::json;
use tokio::sync::mpsc;

#[test]
fn scenario_slow_find_produces_one_report() {
    let mut monitor = test_monitor();

    monitor.handle_started(&started_event(
        1,
        "find",
        json!({ "find": "users", "filter": { "age": 30 } }),
    ));
    let report = monitor
        .handle_succeeded(&succeeded_event(1, 150))
        .expect("150ms find should be reported");

    assert_eq!(report.collection, "users");
    assert_eq!(report.duration, "150ms");
    assert_eq!(report.suggested_indexes.len(), 1);
    assert_eq!(report.suggested_indexes[0].field, "age");
}

#[test]
fn scenario_fast_find_produces_nothing() {
    let mut monitor = test_monitor();

    monitor.handle_started(&started_event(
        1,
        "find",
        json!({ "find": "users", "filter": { "age": 30 } }),
    ));

    assert!(monitor.handle_succeeded(&succeeded_event(1, 50)).is_none());
}

#[test]
fn scenario_aggregate_pipeline_yields_three_suggestions() {
    let mut monitor = test_monitor();

    monitor.handle_started(&started_event(
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
    let report = monitor
        .handle_succeeded(&succeeded_event(2, 200))
        .expect("200ms aggregate should be reported");

    let fields: Vec<&str> = report
        .suggested_indexes
        .iter()
        .map(|s| s.field.as_str())
        .collect();
    assert_eq!(fields, vec!["status", "createdAt", "status"]);
}

#[test]
fn scenario_identical_signatures_report_once() {
    let mut monitor = test_monitor();

    for request_id in [1, 2] {
        monitor.handle_started(&started_event(
            request_id,
            "find",
            json!({ "find": "users", "filter": { "age": 30 } }),
        ));
    }

    assert!(monitor.handle_succeeded(&succeeded_event(1, 150)).is_some());
    assert!(monitor.handle_succeeded(&succeeded_event(2, 150)).is_none());
}

#[test]
fn scenario_orphan_completion_is_harmless() {
    let mut monitor = test_monitor();

    assert!(monitor.handle_succeeded(&succeeded_event(99, 500)).is_none());
    assert_eq!(monitor.pending_len(), 0);
    assert_eq!(monitor.reported_len(), 0);
}

#[test]
fn scenario_custom_threshold_changes_the_cut() {
    let mut monitor = test_monitor_with_threshold(500);

    monitor.handle_started(&started_event(1, "find", json!({ "find": "users" })));
    assert!(monitor.handle_succeeded(&succeeded_event(1, 400)).is_none());

    monitor.handle_started(&started_event(2, "find", json!({ "find": "users" })));
    assert!(monitor.handle_succeeded(&succeeded_event(2, 500)).is_some());
}

#[test]
fn scenario_two_monitors_do_not_share_state() {
    let mut first = test_monitor();
    let mut second = test_monitor();

    first.handle_started(&started_event(
        1,
        "find",
        json!({ "find": "users", "filter": { "age": 30 } }),
    ));
    assert!(first.handle_succeeded(&succeeded_event(1, 150)).is_some());

    // the same signature is fresh for an independent monitor
    second.handle_started(&started_event(
        1,
        "find",
        json!({ "find": "users", "filter": { "age": 30 } }),
    ));
    assert!(second.handle_succeeded(&succeeded_event(1, 150)).is_some());
}

#[test]
fn scenario_events_arrive_as_wire_json() -> Result<()> {
    let mut monitor = test_monitor();

    let started = CommandStartedEvent::from_json(
        r#"{ "requestId": 5, "commandName": "update",
             "command": { "update": "users", "filter": { "active": true } } }"#,
    )?;
    let succeeded = CommandSucceededEvent::from_json(r#"{ "requestId": 5, "duration": 250 }"#)?;

    monitor.handle_started(&started);
    let report = monitor
        .handle_succeeded(&succeeded)
        .expect("250ms update should be reported");

    let rendered = serde_json::to_value(&report)?;
    assert_eq!(rendered["type"], "SLOW_QUERY");
    assert_eq!(rendered["command"], "update");
    assert_eq!(rendered["suggestedIndexes"][0]["field"], "active");
    Ok(())
}

#[tokio::test]
async fn scenario_channel_driven_connection() {
    // capture the monitor's startup line and warnings in the test output
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let (tx, rx) = mpsc::unbounded_channel::<CommandEvent>();
    let handle = tokio::spawn(SlowQueryMonitor::new(MonitorConfig::default()).run(rx));

    // an interleaved burst of lifecycles, as a busy connection would emit
    tx.send(started_event(1, "find", json!({ "find": "users", "filter": { "age": 30 } })).into())
        .unwrap();
    tx.send(started_event(2, "aggregate", json!({
        "aggregate": "orders",
        "pipeline": [{ "$match": { "status": "open" } }],
    })).into())
        .unwrap();
    tx.send(started_event(3, "listCollections", json!({})).into())
        .unwrap();
    tx.send(succeeded_event(2, 200).into()).unwrap();
    tx.send(succeeded_event(1, 40).into()).unwrap();
    tx.send(succeeded_event(3, 999).into()).unwrap();
    drop(tx);

    let monitor = handle.await.expect("monitor task should not panic");
    assert_eq!(monitor.reported_len(), 1);
    assert_eq!(monitor.pending_len(), 0);
}
