//! Violation and decode error types shared by every validation stage.

use serde::{Deserialize, Serialize};

use crate::parse::types::{NodeId, ResourceId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    Normalize,
    Cycle,
    Resource,
    Limits,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Normalize => write!(f, "Normalize"),
            Stage::Cycle => write!(f, "Cycle"),
            Stage::Resource => write!(f, "Resource"),
            Stage::Limits => write!(f, "Limits"),
        }
    }
}

/// A single structural problem found in a submitted graph.
///
/// Violations are data, not errors: every stage appends to a shared list and
/// validation carries on, so an editor can show all of them at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Violation {
    /// A node id appeared more than once; the first occurrence is kept.
    DuplicateNodeId { id: NodeId },
    /// An edge references a node that does not exist; the edge is dropped.
    DanglingEdge { source: NodeId, target: NodeId },
    /// An edge or parent link points a node at itself; the link is dropped.
    SelfLoop { id: NodeId },
    /// The same `source -> target` edge was submitted twice; the copy is dropped.
    DuplicateEdge { source: NodeId, target: NodeId },
    /// A parent link references a node that does not exist; the node becomes a root.
    DanglingParent { node_id: NodeId, parent_id: NodeId },
    CycleDetected { witness: Vec<NodeId> },
    /// The node uses a resource but has no interval to book it for.
    MissingInterval { id: NodeId },
    InvertedInterval {
        id: NodeId,
        start: Timestamp,
        end: Timestamp,
    },
    /// The node references a resource the submission never declared.
    UnknownResource { id: NodeId, resource_id: ResourceId },
    ResourceConflict {
        resource_id: ResourceId,
        node_a: NodeId,
        node_b: NodeId,
    },
    TooManyNodes { count: usize, limit: usize },
    TooManyEdges { count: usize, limit: usize },
    DepthExceeded {
        node_id: NodeId,
        depth: usize,
        limit: usize,
    },
    /// A chain of parent links loops back on itself.
    SelfReferentialParent { node_id: NodeId },
}

impl Violation {
    /// Stable code for the violation kind, suitable for editor lookups.
    pub fn code(&self) -> &'static str {
        match self {
            Violation::DuplicateNodeId { .. } => "G001",
            Violation::DanglingEdge { .. } => "G002",
            Violation::SelfLoop { .. } => "G003",
            Violation::DuplicateEdge { .. } => "G004",
            Violation::DanglingParent { .. } => "G005",
            Violation::CycleDetected { .. } => "G006",
            Violation::MissingInterval { .. } => "G007",
            Violation::InvertedInterval { .. } => "G008",
            Violation::UnknownResource { .. } => "G009",
            Violation::ResourceConflict { .. } => "G010",
            Violation::TooManyNodes { .. } => "G011",
            Violation::TooManyEdges { .. } => "G012",
            Violation::DepthExceeded { .. } => "G013",
            Violation::SelfReferentialParent { .. } => "G014",
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            Violation::DuplicateNodeId { .. }
            | Violation::DanglingEdge { .. }
            | Violation::SelfLoop { .. }
            | Violation::DuplicateEdge { .. }
            | Violation::DanglingParent { .. } => Stage::Normalize,
            Violation::CycleDetected { .. } => Stage::Cycle,
            Violation::MissingInterval { .. }
            | Violation::InvertedInterval { .. }
            | Violation::UnknownResource { .. }
            | Violation::ResourceConflict { .. } => Stage::Resource,
            Violation::TooManyNodes { .. }
            | Violation::TooManyEdges { .. }
            | Violation::DepthExceeded { .. }
            | Violation::SelfReferentialParent { .. } => Stage::Limits,
        }
    }

    /// The node an editor should highlight for this violation, if any.
    pub fn node_id(&self) -> Option<&NodeId> {
        match self {
            Violation::DuplicateNodeId { id }
            | Violation::SelfLoop { id }
            | Violation::MissingInterval { id }
            | Violation::InvertedInterval { id, .. }
            | Violation::UnknownResource { id, .. } => Some(id),
            Violation::DanglingEdge { source, .. } | Violation::DuplicateEdge { source, .. } => {
                Some(source)
            }
            Violation::DanglingParent { node_id, .. }
            | Violation::DepthExceeded { node_id, .. }
            | Violation::SelfReferentialParent { node_id } => Some(node_id),
            Violation::CycleDetected { witness } => witness.first(),
            Violation::ResourceConflict { node_b, .. } => Some(node_b),
            Violation::TooManyNodes { .. } | Violation::TooManyEdges { .. } => None,
        }
    }

    fn message(&self) -> String {
        match self {
            Violation::DuplicateNodeId { id } => format!("Duplicate node id '{}'", id),
            Violation::DanglingEdge { source, target } => format!(
                "Edge '{}' -> '{}' references a node that does not exist",
                source, target
            ),
            Violation::SelfLoop { id } => format!("Self-loop detected on node '{}'", id),
            Violation::DuplicateEdge { source, target } => {
                format!("Duplicate edge from '{}' to '{}'", source, target)
            }
            Violation::DanglingParent { node_id, parent_id } => format!(
                "Node '{}' has unknown parent '{}'",
                node_id, parent_id
            ),
            Violation::CycleDetected { witness } => {
                let path: Vec<String> = witness.iter().map(|id| id.to_string()).collect();
                format!("Dependency cycle: {}", path.join(" -> "))
            }
            Violation::MissingInterval { id } => {
                format!("Node '{}' is assigned a resource but has no interval", id)
            }
            Violation::InvertedInterval { id, start, end } => format!(
                "Node '{}' has an interval ending before it starts ({} > {})",
                id, start, end
            ),
            Violation::UnknownResource { id, resource_id } => format!(
                "Node '{}' references undeclared resource '{}'",
                id, resource_id
            ),
            Violation::ResourceConflict {
                resource_id,
                node_a,
                node_b,
            } => format!(
                "Nodes '{}' and '{}' overlap on resource '{}'",
                node_a, node_b, resource_id
            ),
            Violation::TooManyNodes { count, limit } => {
                format!("Graph has {} nodes, limit is {}", count, limit)
            }
            Violation::TooManyEdges { count, limit } => {
                format!("Graph has {} edges, limit is {}", count, limit)
            }
            Violation::DepthExceeded {
                node_id,
                depth,
                limit,
            } => format!(
                "Node '{}' is nested at depth {}, limit is {}",
                node_id, depth, limit
            ),
            Violation::SelfReferentialParent { node_id } => {
                format!("Parent chain of node '{}' loops back on itself", node_id)
            }
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}:{}] {}", self.stage(), self.code(), self.message())
    }
}

/// Failure to turn submitted JSON into typed graph input.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("failed to parse graph JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{what} at position {index} has an empty id")]
    EmptyId { what: &'static str, index: usize },

    #[error("node '{node}' has an unreadable {field} timestamp '{value}'")]
    Timestamp {
        node: NodeId,
        field: &'static str,
        value: String,
    },
}
