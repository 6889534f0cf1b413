//! Passive slow-query detection and index suggestions for MongoDB
//!
//! This crate is the core of MongoBullet: it attaches to the lifecycle
//! events a driver connection emits, correlates the `started` and
//! `succeeded` halves of each command, and for commands at or above a
//! latency threshold emits one structured warning with heuristic
//! index-creation suggestions. It is attach-only: it never issues commands
//! and never responds to the connection.
//!
//! # Quick Start
//!
//! ```rust
//! use mongobullet_monitor::{MonitorConfig, SlowQueryMonitor};
//! use mongobullet_protocol::{CommandStartedEvent, CommandSucceededEvent};
//! use serde_json::json;
//!
//! let mut monitor = SlowQueryMonitor::new(MonitorConfig::default());
//!
//! monitor.handle_started(&CommandStartedEvent {
//!     request_id: 1,
//!     command_name: "find".to_string(),
//!     command: json!({ "find": "users", "filter": { "age": 30 } }),
//! });
//!
//! let report = monitor
//!     .handle_succeeded(&CommandSucceededEvent { request_id: 1, duration: 150 })
//!     .unwrap();
//! assert_eq!(report.collection, "users");
//! assert_eq!(report.suggested_indexes[0].field, "age");
//! ```
//!
//! For a live connection, forward events into a
//! `tokio::sync::mpsc::UnboundedSender<CommandEvent>` and hand the receiver
//! to [`SlowQueryMonitor::run`]; the monitor then consumes the stream as a
//! single task and logs each report through `tracing`.

pub mod config;
pub mod extract;
pub mod logging;
pub mod monitor;
pub mod pending;
pub mod suggest;
pub mod suppress;

#[cfg(test)]
mod extract_tests;
#[cfg(test)]
mod monitor_tests;

pub use config::MonitorConfig;
pub use extract::{QueryFields, extract_query_fields};
pub use logging::{LogFormat, LoggingConfig};
pub use monitor::{SlowQueryMonitor, SlowQueryReport};
pub use pending::PendingCommands;
pub use suggest::{IndexSuggestion, suggest_indexes};
pub use suppress::{QuerySignature, ReportedSignatures};

/// Default monitor configuration
pub fn default_config() -> MonitorConfig {
    MonitorConfig::default()
}
