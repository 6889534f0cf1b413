//! Driver lifecycle events consumed by the monitor
//!
//! A MongoDB driver connection emits a `commandStarted` notification when it
//! sends a command and a `commandSucceeded` notification when the reply
//! arrives. Both halves carry the driver-assigned `requestId`, which is the
//! only correlation key between them. The monitor subscribes to these
//! fire-and-forget notifications and never acknowledges or responds.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Emitted when the driver sends a command to the server
///
/// `command` is the raw command body as the driver saw it. It is kept as an
/// untyped document here; [`crate::CommandRecord::from_started`] performs
/// the fail-soft structural parse into a typed shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandStartedEvent {
    /// Driver-assigned id, unique per in-flight command at any instant
    pub request_id: i64,
    /// Wire name of the command (`find`, `aggregate`, `insert`, ...)
    pub command_name: String,
    /// Raw command body
    pub command: Value,
}

/// Emitted when the server reply for a command arrives
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandSucceededEvent {
    /// Correlation key matching the earlier started event
    pub request_id: i64,
    /// Round-trip duration in milliseconds
    pub duration: u64,
}

impl CommandStartedEvent {
    /// Deserialize a started event from wire JSON
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

impl CommandSucceededEvent {
    /// Deserialize a succeeded event from wire JSON
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Either half of a command lifecycle, for channel transport
///
/// Connections that forward events over a single channel wrap them in this
/// enum; the monitor's run loop consumes it one event at a time, which keeps
/// all state mutation inside one cooperative task.
#[derive(Debug, Clone)]
pub enum CommandEvent {
    /// A command was sent to the server
    Started(CommandStartedEvent),
    /// The server reply arrived
    Succeeded(CommandSucceededEvent),
}

impl From<CommandStartedEvent> for CommandEvent {
    fn from(event: CommandStartedEvent) -> Self {
        Self::Started(event)
    }
}

impl From<CommandSucceededEvent> for CommandEvent {
    fn from(event: CommandSucceededEvent) -> Self {
        Self::Succeeded(event)
    }
}
