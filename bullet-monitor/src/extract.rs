//! Query field extraction
//!
//! A pure structural walk over a command's shape: top-level filter keys and
//! `$match` stage keys become match fields, top-level sort keys and `$sort`
//! stage keys become sort fields. A field whose value is an operator
//! expression rather than a scalar still counts by key name; no semantic
//! distinction is made between equality and range matches.

use mongobullet_protocol::{CommandRecord, Document};

/// Fields a command uses for matching and sorting
///
/// Each list is duplicate-free and ordered by first appearance in the scan,
/// so a field repeated across pipeline stages shows up once, where it was
/// first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryFields {
    /// Fields used for equality/conditional matching
    pub matched: Vec<String>,
    /// Fields used for ordering results
    pub sorted: Vec<String>,
}

impl QueryFields {
    /// True if the command uses no fields at all
    pub fn is_empty(&self) -> bool {
        self.matched.is_empty() && self.sorted.is_empty()
    }
}

/// Extract the match and sort field sets from a command record
///
/// Absent filter, sort or pipeline parts contribute nothing; a command with
/// none of them yields empty sets, never an error.
pub fn extract_query_fields(record: &CommandRecord) -> QueryFields {
    let mut fields = QueryFields::default();

    if let Some(filter) = record.shape.filter() {
        add_keys(&mut fields.matched, filter);
    }
    if let Some(sort) = record.shape.sort() {
        add_keys(&mut fields.sorted, sort);
    }
    for stage in record.shape.pipeline() {
        if let Some(match_doc) = &stage.match_doc {
            add_keys(&mut fields.matched, match_doc);
        }
        if let Some(sort_doc) = &stage.sort_doc {
            add_keys(&mut fields.sorted, sort_doc);
        }
    }

    fields
}

fn add_keys(out: &mut Vec<String>, doc: &Document) {
    for key in doc.keys() {
        if !out.iter().any(|existing| existing == key) {
            out.push(key.clone());
        }
    }
}
