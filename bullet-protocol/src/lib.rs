//! Command lifecycle event and query-shape types for MongoBullet
//!
//! This crate defines the wire-facing types a slow-query monitor consumes
//! from a MongoDB driver connection: the `commandStarted` and
//! `commandSucceeded` lifecycle events, the closed set of tracked command
//! kinds, and the typed command shapes (filter, sort, aggregation pipeline)
//! the monitor extracts index candidates from.
//!
//! Parsing of command bodies is deliberately fail-soft: the monitor is a
//! best-effort observability layer, so a malformed or partial command
//! document degrades to absent fields rather than an error. The only
//! fallible surface is deserializing a lifecycle event from wire JSON.
//!
//! # Quick Start
//!
//! ```rust
//! use mongobullet_protocol::{CommandKind, CommandRecord, CommandStartedEvent};
//! use serde_json::json;
//!
//! let event = CommandStartedEvent {
//!     request_id: 1,
//!     command_name: "find".to_string(),
//!     command: json!({ "find": "users", "filter": { "age": 30 } }),
//! };
//!
//! let record = CommandRecord::from_started(&event).unwrap();
//! assert_eq!(record.kind, CommandKind::Find);
//! assert_eq!(record.collection, "users");
//! ```

pub mod command;
pub mod error;
pub mod event;


// Re-export core types for easy access
pub use command::{CommandKind, CommandRecord, CommandShape, Document, PipelineStage};
pub use error::{BulletResult, Error, Result};
pub use event::{CommandEvent, CommandStartedEvent, CommandSucceededEvent};
