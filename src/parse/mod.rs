//! Parse phase: editor JSON → typed nodes and edges + graph normalization.

pub mod graph;
mod raw;
pub mod types;

pub use graph::GraphModel;
pub use types::*;

use crate::error::DecodeError;

use raw::{RawNode, RawSubmission, RawTimestamp};

/// Deserialize an editor submission into typed nodes, edges and resources.
pub fn parse(json: &str) -> Result<Submission, DecodeError> {
    let raw: RawSubmission = serde_json::from_str(json)?;

    let mut nodes = Vec::with_capacity(raw.nodes.len());
    for (index, node) in raw.nodes.into_iter().enumerate() {
        if matches!(&node.id, NodeId::Str(s) if s.is_empty()) {
            return Err(DecodeError::EmptyId { what: "node", index });
        }
        nodes.push(convert_node(node)?);
    }

    let edges = raw
        .edges
        .into_iter()
        .map(|edge| {
            let (source, target) = edge.into_endpoints();
            Edge { source, target }
        })
        .collect();

    let resources = match raw.resources {
        Some(list) => {
            let mut ids = Vec::with_capacity(list.len());
            for (index, resource) in list.into_iter().enumerate() {
                let id = resource.into_id();
                if id.is_unset() {
                    return Err(DecodeError::EmptyId {
                        what: "resource",
                        index,
                    });
                }
                ids.push(id);
            }
            Some(ids)
        }
        None => None,
    };

    Ok(Submission {
        nodes,
        edges,
        resources,
    })
}

fn convert_node(raw: RawNode) -> Result<Node, DecodeError> {
    let start = resolve_timestamp(&raw.id, "start", raw.start.as_ref())?;
    let end = resolve_timestamp(&raw.id, "end", raw.end.as_ref())?;

    let interval = match (start, end) {
        (Some(start), Some(end)) => Some(Interval { start, end }),
        _ => None,
    };

    Ok(Node {
        resource_id: raw.resource_id.filter(|r| !r.is_unset()),
        parent_id: raw.parent_id.filter(|p| !p.is_unset()),
        interval,
        id: raw.id,
    })
}

fn resolve_timestamp(
    node: &NodeId,
    field: &'static str,
    value: Option<&RawTimestamp>,
) -> Result<Option<Timestamp>, DecodeError> {
    let Some(value) = value else {
        return Ok(None);
    };
    if matches!(value, RawTimestamp::Text(text) if text.trim().is_empty()) {
        return Ok(None);
    }
    match value.resolve() {
        Some(ts) => Ok(Some(Timestamp(ts))),
        None => Err(DecodeError::Timestamp {
            node: node.clone(),
            field,
            value: value.as_text(),
        }),
    }
}
