//! Structural ceilings: node count, edge count and tree depth.

use crate::config::ValidationConfig;
use crate::error::Violation;
use crate::parse::graph::GraphModel;

/// Every check runs; none short-circuits another.
pub fn check_limits(model: &GraphModel, config: &ValidationConfig, violations: &mut Vec<Violation>) {
    let nodes = model.node_count();
    if nodes > config.max_nodes {
        violations.push(Violation::TooManyNodes {
            count: nodes,
            limit: config.max_nodes,
        });
    }

    let edges = model.edge_count();
    if edges > config.max_edges {
        violations.push(Violation::TooManyEdges {
            count: edges,
            limit: config.max_edges,
        });
    }

    if let Some(limit) = config.max_depth {
        check_depth(model, limit, violations);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Depth {
    Unknown,
    OnPath,
    Known(usize),
    /// On a parent loop, or below one.
    Cyclic,
}

/// Depth of each node along its `parent_id` chain (roots are 0), or `None`
/// when the chain never reaches a root. Also returns the first node, in node
/// order, of every parent loop found.
pub fn node_depths(model: &GraphModel) -> (Vec<Option<usize>>, Vec<usize>) {
    let parents = model.parent_indices();
    let mut state = vec![Depth::Unknown; parents.len()];
    let mut loops = Vec::new();
    let mut path = Vec::new();

    for start in 0..parents.len() {
        if state[start] != Depth::Unknown {
            continue;
        }

        // Climb until something already resolved, a root, or our own path.
        path.clear();
        let mut current = Some(start);
        let mut above: Option<Depth> = None;
        while let Some(i) = current {
            match state[i] {
                Depth::Unknown => {
                    state[i] = Depth::OnPath;
                    path.push(i);
                    current = parents[i];
                }
                Depth::OnPath => {
                    if let Some(pos) = path.iter().position(|&p| p == i) {
                        let members = path.split_off(pos);
                        if let Some(&first) = members.iter().min() {
                            loops.push(first);
                        }
                        for m in members {
                            state[m] = Depth::Cyclic;
                        }
                    }
                    above = Some(Depth::Cyclic);
                    break;
                }
                resolved => {
                    above = Some(resolved);
                    break;
                }
            }
        }

        for &i in path.iter().rev() {
            let depth = match above {
                None => Depth::Known(0),
                Some(Depth::Known(d)) => Depth::Known(d + 1),
                Some(_) => Depth::Cyclic,
            };
            state[i] = depth;
            above = Some(depth);
        }
    }

    let depths = state
        .into_iter()
        .map(|d| match d {
            Depth::Known(d) => Some(d),
            _ => None,
        })
        .collect();
    (depths, loops)
}

fn check_depth(model: &GraphModel, limit: usize, violations: &mut Vec<Violation>) {
    let (depths, mut loops) = node_depths(model);

    loops.sort_unstable();
    for i in loops {
        violations.push(Violation::SelfReferentialParent {
            node_id: model.id_at(i).clone(),
        });
    }

    for (i, depth) in depths.into_iter().enumerate() {
        if let Some(depth) = depth {
            if depth > limit {
                violations.push(Violation::DepthExceeded {
                    node_id: model.id_at(i).clone(),
                    depth,
                    limit,
                });
            }
        }
    }
}
