//! petgraph-backed dependency graph built from a submission.
//!
//! Construction repairs what it can (duplicate ids, dangling or repeated
//! edges, self-loops, unknown parents) and reports each repair as a
//! [`Violation`], so later stages always see a well-formed graph.

use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use super::types::{Edge, Node, NodeId};
use crate::error::Violation;

pub struct GraphModel {
    /// Node indices follow first-seen order; edge indices follow edge-list order.
    pub graph: DiGraph<Node, ()>,
    pub node_indices: HashMap<NodeId, NodeIndex>,
}

impl GraphModel {
    pub fn build(nodes: Vec<Node>, edges: Vec<Edge>) -> (Self, Vec<Violation>) {
        let mut graph = DiGraph::with_capacity(nodes.len(), edges.len());
        let mut node_indices = HashMap::with_capacity(nodes.len());
        let mut violations = Vec::new();

        for node in nodes {
            if node_indices.contains_key(&node.id) {
                violations.push(Violation::DuplicateNodeId { id: node.id });
                continue;
            }
            let id = node.id.clone();
            let idx = graph.add_node(node);
            node_indices.insert(id, idx);
        }

        // Parent links are checked once every id is known.
        for idx in graph.node_indices() {
            let node = &mut graph[idx];
            let Some(parent_id) = &node.parent_id else {
                continue;
            };
            if *parent_id == node.id {
                violations.push(Violation::SelfLoop {
                    id: node.id.clone(),
                });
                node.parent_id = None;
            } else if !node_indices.contains_key(parent_id) {
                violations.push(Violation::DanglingParent {
                    node_id: node.id.clone(),
                    parent_id: parent_id.clone(),
                });
                node.parent_id = None;
            }
        }

        let mut seen = HashSet::with_capacity(edges.len());
        for edge in edges {
            let source_idx = node_indices.get(&edge.source);
            let target_idx = node_indices.get(&edge.target);

            match (source_idx, target_idx) {
                (Some(&s), Some(&t)) => {
                    if s == t {
                        violations.push(Violation::SelfLoop { id: edge.source });
                    } else if !seen.insert((s, t)) {
                        violations.push(Violation::DuplicateEdge {
                            source: edge.source,
                            target: edge.target,
                        });
                    } else {
                        graph.add_edge(s, t, ());
                    }
                }
                _ => {
                    violations.push(Violation::DanglingEdge {
                        source: edge.source,
                        target: edge.target,
                    });
                }
            }
        }

        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            repaired = violations.len(),
            "normalized graph model"
        );

        (GraphModel { graph, node_indices }, violations)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.node_indices.contains_key(id)
    }

    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.node_indices.get(id).map(|&idx| &self.graph[idx])
    }

    /// Nodes in first-seen order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// Edges in submission order, after repairs.
    pub fn edges(&self) -> impl Iterator<Item = (&NodeId, &NodeId)> {
        self.graph
            .edge_references()
            .map(|e| (&self.graph[e.source()].id, &self.graph[e.target()].id))
    }

    /// Direct dependents of `node_id`, in edge-list order.
    pub fn successors(&self, node_id: &NodeId) -> Vec<&NodeId> {
        let Some(&idx) = self.node_indices.get(node_id) else {
            return vec![];
        };
        let mut out: Vec<_> = self.graph.edges(idx).collect();
        out.sort_by_key(|e| e.id());
        out.into_iter()
            .map(|e| &self.graph[e.target()].id)
            .collect()
    }

    pub fn incoming_count(&self, node_id: &NodeId) -> usize {
        let Some(&idx) = self.node_indices.get(node_id) else {
            return 0;
        };
        self.graph
            .neighbors_directed(idx, petgraph::Direction::Incoming)
            .count()
    }

    pub fn outgoing_count(&self, node_id: &NodeId) -> usize {
        let Some(&idx) = self.node_indices.get(node_id) else {
            return 0;
        };
        self.graph
            .neighbors_directed(idx, petgraph::Direction::Outgoing)
            .count()
    }

    /// Outgoing neighbours per node as dense indices, in edge-list order.
    ///
    /// petgraph walks a node's edges newest-first, so traversals that need
    /// a stable order go through this instead.
    pub(crate) fn adjacency(&self) -> Vec<Vec<usize>> {
        let mut adjacency = vec![Vec::new(); self.graph.node_count()];
        for edge in self.graph.edge_references() {
            adjacency[edge.source().index()].push(edge.target().index());
        }
        adjacency
    }

    /// Parent of each node as a dense index; `None` for roots.
    pub(crate) fn parent_indices(&self) -> Vec<Option<usize>> {
        self.graph
            .node_weights()
            .map(|node| {
                node.parent_id
                    .as_ref()
                    .and_then(|p| self.node_indices.get(p))
                    .map(|idx| idx.index())
            })
            .collect()
    }

    pub(crate) fn id_at(&self, index: usize) -> &NodeId {
        &self.graph[NodeIndex::new(index)].id
    }
}
