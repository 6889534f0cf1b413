//! Slow query monitor orchestration
//!
//! One monitor instance owns one pending-command table and one suppression
//! set; nothing here is global, so several monitors (or tests) can run side
//! by side without shared state. Both event handlers mutate that state
//! synchronously, which is all the discipline a single cooperative event
//! loop needs.

use serde::Serialize;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};

use mongobullet_protocol::{
    CommandEvent, CommandKind, CommandRecord, CommandStartedEvent, CommandSucceededEvent,
};

use crate::config::MonitorConfig;
use crate::extract::extract_query_fields;
use crate::pending::PendingCommands;
use crate::suggest::{IndexSuggestion, suggest_indexes};
use crate::suppress::{QuerySignature, ReportedSignatures};

/// One reported slow query, in its wire/log shape
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlowQueryReport {
    /// Record discriminator, always `"SLOW_QUERY"`
    #[serde(rename = "type")]
    pub record_type: &'static str,
    /// Target collection
    pub collection: String,
    /// Tracked command kind
    pub command: CommandKind,
    /// Measured duration with a millisecond suffix, e.g. `"150ms"`
    pub duration: String,
    /// Ordered index suggestions for the query shape
    pub suggested_indexes: Vec<IndexSuggestion>,
}

impl SlowQueryReport {
    fn new(record: &CommandRecord, duration_ms: u64) -> Self {
        let fields = extract_query_fields(record);
        Self {
            record_type: "SLOW_QUERY",
            collection: record.collection.clone(),
            command: record.kind,
            duration: format!("{duration_ms}ms"),
            suggested_indexes: suggest_indexes(&fields, record.kind),
        }
    }
}

/// Passive slow-query monitor for one driver connection
///
/// Feed it the connection's lifecycle events, either directly through
/// [`Self::handle_started`] / [`Self::handle_succeeded`] or as a task via
/// [`Self::run`]. Commands whose kind is untracked, whose duration is below
/// the threshold, or whose signature was already reported produce nothing.
pub struct SlowQueryMonitor {
    config: MonitorConfig,
    pending: PendingCommands,
    reported: ReportedSignatures,
}

impl SlowQueryMonitor {
    /// Create a monitor with its own empty correlation state
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            config,
            pending: PendingCommands::new(),
            reported: ReportedSignatures::new(),
        }
    }

    /// Handle a `commandStarted` event
    ///
    /// Untracked or malformed commands are dropped here, so their completion
    /// later finds no record and is ignored for free.
    pub fn handle_started(&mut self, event: &CommandStartedEvent) {
        if let Some(record) = CommandRecord::from_started(event) {
            self.pending.insert(event.request_id, record);
        }
    }

    /// Handle a `commandSucceeded` event, returning a report if this
    /// completion crossed the threshold and was not seen before
    ///
    /// A completion with no pending record (untracked kind, duplicate or
    /// late event) is silently ignored.
    pub fn handle_succeeded(&mut self, event: &CommandSucceededEvent) -> Option<SlowQueryReport> {
        let record = self.pending.take(event.request_id)?;

        if event.duration < self.config.slow_threshold_ms {
            return None;
        }

        let signature = QuerySignature {
            collection: record.collection.clone(),
            kind: record.kind,
            duration_ms: event.duration,
        };
        if self.reported.check_and_mark(signature) {
            debug!(
                collection = %record.collection,
                command = %record.kind,
                duration_ms = event.duration,
                "slow query already reported, suppressing"
            );
            return None;
        }

        Some(SlowQueryReport::new(&record, event.duration))
    }

    /// Dispatch either half of a lifecycle
    pub fn handle_event(&mut self, event: &CommandEvent) -> Option<SlowQueryReport> {
        match event {
            CommandEvent::Started(started) => {
                self.handle_started(started);
                None
            }
            CommandEvent::Succeeded(succeeded) => self.handle_succeeded(succeeded),
        }
    }

    /// Consume a connection's event stream until the sender side closes
    ///
    /// This is the single cooperative loop the monitor is designed around:
    /// one task, events handled strictly one at a time, each report emitted
    /// as one structured warning. Returns the monitor so callers can inspect
    /// its state after the connection goes away.
    pub async fn run(mut self, mut events: UnboundedReceiver<CommandEvent>) -> Self {
        info!(
            slow_threshold_ms = self.config.slow_threshold_ms,
            "===== Mongo bullet started ====="
        );

        while let Some(event) = events.recv().await {
            if let Some(report) = self.handle_event(&event) {
                emit(&report);
            }
        }

        self
    }

    /// Commands currently awaiting completion
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Distinct slow-query signatures reported so far
    pub fn reported_len(&self) -> usize {
        self.reported.len()
    }
}

fn emit(report: &SlowQueryReport) {
    // the report is rendered whole so one log event carries the exact wire shape
    let rendered = serde_json::to_string(report).unwrap_or_default();
    warn!(
        target: "mongobullet",
        collection = %report.collection,
        command = %report.command,
        duration = %report.duration,
        slow_query = %rendered,
        "slow query detected"
    );
}
