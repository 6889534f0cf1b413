//! Index suggestion heuristic
//!
//! Turns extracted field sets into an ordered suggestion list. The rules are
//! deliberately simple and deterministic: match fields first, sort fields
//! second, and for aggregations with any match field one extra suggestion on
//! the first match field, since an indexed leading `$match` is what lets the
//! server cut the pipeline's input early. No deduplication and no cap; a
//! field appearing for both matching and sorting is two suggestions.

use crate::extract::QueryFields;
use mongobullet_protocol::CommandKind;
use serde::{Deserialize, Serialize};

/// Rationale attached to match-field suggestions
pub const REASON_EQUALITY_FILTER: &str =
    "Field used in equality filter. Index generally reduces full scans.";

/// Rationale attached to sort-field suggestions
pub const REASON_SORT_SCAN: &str = "Field used in sorting. Index enables sort via index scan.";

/// Rationale attached to the extra aggregate suggestion
pub const REASON_PIPELINE_MATCH: &str =
    "The first stage of the pipeline is $match. Indices greatly accelerate pipelines.";

/// One candidate index: a field and why it would help
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSuggestion {
    /// Field the index would cover
    pub field: String,
    /// Human-readable rationale
    pub reason: String,
}

impl IndexSuggestion {
    fn new(field: &str, reason: &str) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Produce the ordered suggestion list for one slow command
pub fn suggest_indexes(fields: &QueryFields, kind: CommandKind) -> Vec<IndexSuggestion> {
    let mut suggestions = Vec::with_capacity(fields.matched.len() + fields.sorted.len() + 1);

    for field in &fields.matched {
        suggestions.push(IndexSuggestion::new(field, REASON_EQUALITY_FILTER));
    }
    for field in &fields.sorted {
        suggestions.push(IndexSuggestion::new(field, REASON_SORT_SCAN));
    }
    if kind == CommandKind::Aggregate
        && let Some(first) = fields.matched.first()
    {
        suggestions.push(IndexSuggestion::new(first, REASON_PIPELINE_MATCH));
    }

    suggestions
}
