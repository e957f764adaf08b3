//! Typed graph input: identifiers, intervals, nodes and edges.
//!
//! These are the values the validation stages work on. Wire shapes for the
//! editors' JSON live in `parse::raw` and are converted into these types by
//! [`crate::parse::parse`].

use serde::{Deserialize, Serialize};

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(untagged)]
        pub enum $name {
            Int(i64),
            Str(String),
        }

        impl $name {
            /// Editors encode "no reference" as `0` or `""` as well as `null`.
            pub(crate) fn is_unset(&self) -> bool {
                match self {
                    $name::Int(n) => *n == 0,
                    $name::Str(s) => s.is_empty(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $name::Int(n) => write!(f, "{}", n),
                    $name::Str(s) => write!(f, "{}", s),
                }
            }
        }

        impl From<i64> for $name {
            fn from(n: i64) -> Self {
                $name::Int(n)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name::Str(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name::Str(s)
            }
        }
    };
}

opaque_id!(
    /// Identifier of a node, unique within one graph.
    NodeId
);

opaque_id!(
    /// Identifier of a bookable resource (a person, a machine, a room).
    ResourceId
);

/// A point in time. Integers are taken as-is; date strings decode to Unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Timestamp {
    fn from(n: i64) -> Self {
        Timestamp(n)
    }
}

/// Closed-open span `[start, end)` during which a node holds its resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl Interval {
    pub fn new(start: i64, end: i64) -> Self {
        Interval {
            start: Timestamp(start),
            end: Timestamp(end),
        }
    }

    /// Zero-length spans hold nothing and never overlap.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    pub fn overlaps(&self, other: &Interval) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.start < other.end
            && other.start < self.end
    }
}

/// The validation-relevant view of a node. Domain payload is not modeled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub resource_id: Option<ResourceId>,
    pub interval: Option<Interval>,
    pub parent_id: Option<NodeId>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>) -> Self {
        Node {
            id: id.into(),
            resource_id: None,
            interval: None,
            parent_id: None,
        }
    }

    pub fn with_resource(mut self, resource_id: impl Into<ResourceId>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    pub fn with_interval(mut self, start: i64, end: i64) -> Self {
        self.interval = Some(Interval::new(start, end));
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<NodeId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }
}

/// `target` depends on `source`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Edge {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl<S: Into<NodeId>, T: Into<NodeId>> From<(S, T)> for Edge {
    fn from((source, target): (S, T)) -> Self {
        Edge::new(source, target)
    }
}

/// A decoded editor submission.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    /// Declared resources, when the editor sends a resource list.
    pub resources: Option<Vec<ResourceId>>,
}

impl Submission {
    pub fn into_parts(self) -> (Vec<Node>, Vec<Edge>) {
        (self.nodes, self.edges)
    }
}
