//! Typed command kinds and query shapes
//!
//! Only four command kinds are worth index suggestions: `find`, `aggregate`,
//! `update` and `delete`. Everything else a connection emits is untracked.
//! Each tracked kind names its target collection under a kind-specific key
//! of the command body; [`CommandKind::collection_key`] is the explicit
//! lookup table for that mapping.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::event::CommandStartedEvent;

/// A flat command sub-document (filter, sort, `$match`, `$sort`)
///
/// Extraction only ever reads the top-level key set, so the values stay
/// untyped.
pub type Document = serde_json::Map<String, Value>;

/// The closed set of command kinds the monitor tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    /// A `find` query
    Find,
    /// An `aggregate` pipeline
    Aggregate,
    /// An `update` command
    Update,
    /// A `delete` command
    Delete,
}

impl CommandKind {
    /// Parse a wire command name, `None` for untracked kinds
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "find" => Some(Self::Find),
            "aggregate" => Some(Self::Aggregate),
            "update" => Some(Self::Update),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }

    /// Wire name of the kind
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Find => "find",
            Self::Aggregate => "aggregate",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Command-body key that carries the target collection name
    ///
    /// MongoDB names the collection field after the command itself
    /// (`{ "find": "users", ... }`), so this coincides with [`Self::as_str`]
    /// for every tracked kind; it is kept as its own table so the mapping
    /// stays explicit.
    pub const fn collection_key(self) -> &'static str {
        match self {
            Self::Find => "find",
            Self::Aggregate => "aggregate",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One aggregation pipeline stage, reduced to the parts extraction reads
///
/// A stage document can carry any operator; only `$match` and `$sort`
/// contribute index candidates. Non-object stages and stages without either
/// operator parse to an empty stage rather than failing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineStage {
    /// Top-level `$match` sub-document, if the stage has one
    pub match_doc: Option<Document>,
    /// Top-level `$sort` sub-document, if the stage has one
    pub sort_doc: Option<Document>,
}

impl PipelineStage {
    /// Fail-soft parse of a raw stage value
    pub fn from_value(stage: &Value) -> Self {
        let Some(stage) = stage.as_object() else {
            return Self::default();
        };
        Self {
            match_doc: sub_document(stage, "$match"),
            sort_doc: sub_document(stage, "$sort"),
        }
    }
}

/// The query shape of a tracked command, carrying only the fields its kind
/// can contribute to extraction
#[derive(Debug, Clone, PartialEq)]
pub enum CommandShape {
    /// `find` carries an optional filter and an optional sort clause
    Find {
        /// Top-level equality filter document
        filter: Option<Document>,
        /// Top-level sort document
        sort: Option<Document>,
    },
    /// `aggregate` carries its stage pipeline
    Aggregate {
        /// Pipeline stages in execution order
        pipeline: Vec<PipelineStage>,
    },
    /// `update` carries an optional filter
    Update {
        /// Top-level equality filter document
        filter: Option<Document>,
    },
    /// `delete` carries an optional filter
    Delete {
        /// Top-level equality filter document
        filter: Option<Document>,
    },
}

impl CommandShape {
    /// Fail-soft parse of a command body for the given kind
    ///
    /// Missing or wrongly-typed parts come back absent; nothing here errors.
    pub fn from_body(kind: CommandKind, body: &Document) -> Self {
        match kind {
            CommandKind::Find => Self::Find {
                filter: sub_document(body, "filter"),
                sort: sub_document(body, "sort"),
            },
            CommandKind::Aggregate => Self::Aggregate {
                pipeline: body
                    .get("pipeline")
                    .and_then(Value::as_array)
                    .map(|stages| stages.iter().map(PipelineStage::from_value).collect())
                    .unwrap_or_default(),
            },
            CommandKind::Update => Self::Update {
                filter: sub_document(body, "filter"),
            },
            CommandKind::Delete => Self::Delete {
                filter: sub_document(body, "filter"),
            },
        }
    }

    /// Top-level filter document, for the kinds that carry one
    pub fn filter(&self) -> Option<&Document> {
        match self {
            Self::Find { filter, .. } | Self::Update { filter } | Self::Delete { filter } => {
                filter.as_ref()
            }
            Self::Aggregate { .. } => None,
        }
    }

    /// Top-level sort document, for the kinds that carry one
    pub fn sort(&self) -> Option<&Document> {
        match self {
            Self::Find { sort, .. } => sort.as_ref(),
            _ => None,
        }
    }

    /// Pipeline stages, empty for non-aggregate kinds
    pub fn pipeline(&self) -> &[PipelineStage] {
        match self {
            Self::Aggregate { pipeline } => pipeline,
            _ => &[],
        }
    }
}

/// One in-flight command as stored in the pending table
#[derive(Debug, Clone, PartialEq)]
pub struct CommandRecord {
    /// Which tracked command this is
    pub kind: CommandKind,
    /// Target collection name
    pub collection: String,
    /// Query shape extraction will walk
    pub shape: CommandShape,
}

impl CommandRecord {
    /// Build a record from a started event, `None` if the command is not
    /// worth tracking
    ///
    /// Untracked command kinds, non-object bodies and a missing or
    /// non-string collection field all yield `None`; the monitor then
    /// simply never correlates the completion.
    pub fn from_started(event: &CommandStartedEvent) -> Option<Self> {
        let kind = CommandKind::parse(&event.command_name)?;
        let body = event.command.as_object()?;
        let collection = body.get(kind.collection_key())?.as_str()?.to_string();
        Some(Self {
            kind,
            collection,
            shape: CommandShape::from_body(kind, body),
        })
    }
}

fn sub_document(body: &Document, key: &str) -> Option<Document> {
    body.get(key).and_then(Value::as_object).cloned()
}
