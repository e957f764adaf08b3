//! Dependency cycle detection.

use crate::error::Violation;
use crate::parse::graph::GraphModel;
use crate::parse::types::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Three-colour DFS with an explicit stack.
///
/// Roots are tried in node order and edges in edge-list order, so the same
/// graph always yields the same witness. The witness starts and ends at the
/// node the closing edge points back to.
pub fn find_cycle(model: &GraphModel) -> Option<Vec<NodeId>> {
    let adjacency = model.adjacency();
    let n = adjacency.len();
    let mut marks = vec![Mark::Unvisited; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];
    // (node, position of the next outgoing edge to follow)
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..n {
        if marks[root] != Mark::Unvisited {
            continue;
        }
        marks[root] = Mark::InProgress;
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let (node, pos) = *frame;
            let Some(&next) = adjacency[node].get(pos) else {
                marks[node] = Mark::Done;
                stack.pop();
                continue;
            };
            frame.1 += 1;

            match marks[next] {
                Mark::Unvisited => {
                    marks[next] = Mark::InProgress;
                    parent[next] = Some(node);
                    stack.push((next, 0));
                }
                Mark::InProgress => return Some(witness(model, &parent, node, next)),
                Mark::Done => {}
            }
        }
    }

    None
}

/// Walk parent pointers from the edge's tail back to the repeated node.
fn witness(model: &GraphModel, parent: &[Option<usize>], from: usize, to: usize) -> Vec<NodeId> {
    let mut path = vec![from];
    let mut current = from;
    while current != to {
        match parent[current] {
            Some(p) => {
                path.push(p);
                current = p;
            }
            None => break,
        }
    }
    path.reverse();
    path.push(to);
    path.into_iter().map(|i| model.id_at(i).clone()).collect()
}

pub fn check_cycles(model: &GraphModel, violations: &mut Vec<Violation>) {
    if let Some(witness) = find_cycle(model) {
        tracing::debug!(length = witness.len() - 1, "dependency cycle found");
        violations.push(Violation::CycleDetected { witness });
    }
}
