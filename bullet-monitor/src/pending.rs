//! Correlation table for in-flight commands
//!
//! A connection interleaves `started` and `succeeded` events for different
//! requests arbitrarily, so correlation needs an explicit table keyed by
//! request id rather than any ordering assumption. The table is owned by
//! exactly one monitor instance and mutated synchronously inside its event
//! handlers.

use mongobullet_protocol::CommandRecord;
use std::collections::HashMap;

/// In-flight commands awaiting their completion event
///
/// Unbounded: a command whose completion never arrives stays here for the
/// life of the process. That leak is an accepted trade-off for a monitoring
/// tool of bounded lifetime; a hardened deployment would evict on a TTL.
#[derive(Debug, Default)]
pub struct PendingCommands {
    commands: HashMap<i64, CommandRecord>,
}

impl PendingCommands {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the record for a request id
    ///
    /// A second `started` for a live request id is not expected from a
    /// well-behaved driver; if it happens, the later record silently
    /// replaces the earlier one (last write wins).
    pub fn insert(&mut self, request_id: i64, record: CommandRecord) {
        self.commands.insert(request_id, record);
    }

    /// Remove and return the record for a request id, if any
    pub fn take(&mut self, request_id: i64) -> Option<CommandRecord> {
        self.commands.remove(&request_id)
    }

    /// Number of commands still awaiting completion
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True if nothing is in flight
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
