//! Duplicate report suppression
//!
//! Reporting the same slow query on every occurrence would drown the log,
//! so each reported query is remembered by its signature: collection,
//! command kind and exact duration. Different durations of the same query
//! shape are distinct signatures on purpose; they show up as separate data
//! points.

use mongobullet_protocol::CommandKind;
use std::collections::HashSet;

/// Deduplication key for a slow-query report
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuerySignature {
    /// Target collection
    pub collection: String,
    /// Tracked command kind
    pub kind: CommandKind,
    /// Measured duration in milliseconds, compared exactly
    pub duration_ms: u64,
}

/// Signatures that have already been reported
///
/// Grows monotonically for the life of the process; suppression is
/// permanent, not time-windowed.
#[derive(Debug, Default)]
pub struct ReportedSignatures {
    seen: HashSet<QuerySignature>,
}

impl ReportedSignatures {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the signature was already reported; marks it either way
    pub fn check_and_mark(&mut self, signature: QuerySignature) -> bool {
        !self.seen.insert(signature)
    }

    /// Number of distinct signatures reported so far
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// True if nothing has been reported yet
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
