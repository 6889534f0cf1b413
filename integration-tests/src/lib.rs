//! Integration tests for the MongoBullet slow query monitor
//!
//! These tests drive a monitor end to end with the lifecycle events a real
//! driver connection would emit, across the protocol and monitor crates.

#![allow(unused_imports)] // Allow unused imports in integration tests

pub mod slow_query_scenarios;

/// Common test utilities for integration tests
pub mod test_utils {
    use mongobullet_monitor::{MonitorConfig, SlowQueryMonitor};
    use mongobullet_protocol::{CommandStartedEvent, CommandSucceededEvent};
    use serde_json::Value;

    /// Create a monitor with the default 100ms threshold
    pub fn test_monitor() -> SlowQueryMonitor {
        SlowQueryMonitor::new(MonitorConfig::default())
    }

    /// Create a monitor with an explicit threshold
    pub fn test_monitor_with_threshold(slow_threshold_ms: u64) -> SlowQueryMonitor {
        SlowQueryMonitor::new(MonitorConfig { slow_threshold_ms })
    }

    /// Build a started event from raw parts
    pub fn started_event(request_id: i64, command_name: &str, command: Value) -> CommandStartedEvent {
        CommandStartedEvent {
            request_id,
            command_name: command_name.to_string(),
            command,
        }
    }

    /// Build a succeeded event from raw parts
    pub fn succeeded_event(request_id: i64, duration: u64) -> CommandSucceededEvent {
        CommandSucceededEvent {
            request_id,
            duration,
        }
    }
}
