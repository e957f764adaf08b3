//! Wire shapes sent by the editors.
//!
//! Two layouts are accepted: `{"nodes", "edges"}` from the workflow designer,
//! tree view and schema graph, and `{"tasks", "links", "resources"}` from the
//! planning board. Unknown fields (labels, colors, positions) are ignored.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;

use super::types::{NodeId, ResourceId};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y"];

#[derive(Debug, Deserialize)]
pub(crate) struct RawSubmission {
    #[serde(default, alias = "tasks")]
    pub nodes: Vec<RawNode>,
    #[serde(default, alias = "links")]
    pub edges: Vec<RawEdge>,
    #[serde(default)]
    pub resources: Option<Vec<RawResource>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawNode {
    pub id: NodeId,
    #[serde(default, alias = "resource")]
    pub resource_id: Option<ResourceId>,
    #[serde(default, alias = "parent")]
    pub parent_id: Option<NodeId>,
    #[serde(default, alias = "start_date")]
    pub start: Option<RawTimestamp>,
    #[serde(default, alias = "end_date")]
    pub end: Option<RawTimestamp>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawEdge {
    Object { source: NodeId, target: NodeId },
    Pair(NodeId, NodeId),
}

impl RawEdge {
    pub fn into_endpoints(self) -> (NodeId, NodeId) {
        match self {
            RawEdge::Object { source, target } => (source, target),
            RawEdge::Pair(source, target) => (source, target),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawResource {
    Object { id: ResourceId },
    Bare(ResourceId),
}

impl RawResource {
    pub fn into_id(self) -> ResourceId {
        match self {
            RawResource::Object { id } | RawResource::Bare(id) => id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawTimestamp {
    Int(i64),
    Text(String),
}

impl RawTimestamp {
    /// Integers pass through; text is read as an integer, RFC 3339, or one
    /// of the editors' date layouts (UTC, Unix seconds).
    pub fn resolve(&self) -> Option<i64> {
        match self {
            RawTimestamp::Int(n) => Some(*n),
            RawTimestamp::Text(text) => parse_timestamp_text(text.trim()),
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            RawTimestamp::Int(n) => n.to_string(),
            RawTimestamp::Text(text) => text.clone(),
        }
    }
}

fn parse_timestamp_text(text: &str) -> Option<i64> {
    if let Ok(n) = text.parse::<i64>() {
        return Some(n);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.and_utc().timestamp());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_text_passes_through() {
        assert_eq!(parse_timestamp_text("42"), Some(42));
    }

    #[test]
    fn iso_date_is_midnight_utc() {
        assert_eq!(parse_timestamp_text("1970-01-02"), Some(86_400));
    }

    #[test]
    fn planning_board_layout() {
        assert_eq!(parse_timestamp_text("02-01-1970 01:00"), Some(86_400 + 3_600));
    }

    #[test]
    fn rfc3339_with_offset() {
        assert_eq!(parse_timestamp_text("1970-01-01T01:00:00+01:00"), Some(0));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(parse_timestamp_text("next tuesday"), None);
    }
}
