//! Resource double-booking detection.

use std::collections::{HashMap, HashSet};

use crate::error::Violation;
use crate::parse::graph::GraphModel;
use crate::parse::types::{Interval, NodeId, ResourceId, Timestamp};

/// Two nodes holding the same resource over overlapping intervals.
/// `node_a` starts no later than `node_b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceConflict {
    pub resource_id: ResourceId,
    pub node_a: NodeId,
    pub node_b: NodeId,
}

/// Report every overlapping pair within each resource group.
///
/// Intervals are closed-open: one ending exactly where another starts is
/// fine, and zero-length intervals never conflict. Each group is sorted by
/// start (ties by id) and swept once while tracking the intervals still
/// open, so nested spans are caught as well as adjacent ones.
pub fn find_conflicts(model: &GraphModel) -> Vec<ResourceConflict> {
    let mut group_of: HashMap<&ResourceId, usize> = HashMap::new();
    let mut groups: Vec<(&ResourceId, Vec<(Interval, &NodeId)>)> = Vec::new();

    for node in model.nodes() {
        let (Some(resource_id), Some(interval)) = (&node.resource_id, node.interval) else {
            continue;
        };
        if interval.is_empty() || interval.is_inverted() {
            continue;
        }
        let slot = *group_of.entry(resource_id).or_insert_with(|| {
            groups.push((resource_id, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push((interval, &node.id));
    }

    let mut conflicts = Vec::new();
    for (resource_id, mut members) in groups {
        members.sort_by(|a, b| a.0.start.cmp(&b.0.start).then_with(|| a.1.cmp(b.1)));
        sweep(resource_id, &members, &mut conflicts);
    }
    conflicts
}

fn sweep(
    resource_id: &ResourceId,
    members: &[(Interval, &NodeId)],
    conflicts: &mut Vec<ResourceConflict>,
) {
    let mut open: Vec<(Timestamp, &NodeId)> = Vec::new();
    let mut max_end: Option<Timestamp> = None;

    for &(interval, id) in members {
        if max_end.is_some_and(|end| interval.start >= end) {
            open.clear();
        } else {
            open.retain(|&(end, _)| end > interval.start);
        }

        for &(_, other) in &open {
            tracing::trace!(%resource_id, a = %other, b = %id, "resource conflict");
            conflicts.push(ResourceConflict {
                resource_id: resource_id.clone(),
                node_a: other.clone(),
                node_b: id.clone(),
            });
        }

        open.push((interval.end, id));
        max_end = Some(max_end.map_or(interval.end, |end| end.max(interval.end)));
    }
}

/// Per-node resource checks followed by the conflict sweep.
///
/// `declared` is the submission's resource list, when it sent one.
pub fn check_resources(
    model: &GraphModel,
    declared: Option<&[ResourceId]>,
    violations: &mut Vec<Violation>,
) {
    let declared: Option<HashSet<&ResourceId>> = declared.map(|list| list.iter().collect());

    for node in model.nodes() {
        let Some(resource_id) = &node.resource_id else {
            continue;
        };
        if let Some(declared) = &declared {
            if !declared.contains(resource_id) {
                violations.push(Violation::UnknownResource {
                    id: node.id.clone(),
                    resource_id: resource_id.clone(),
                });
            }
        }
        match node.interval {
            None => violations.push(Violation::MissingInterval {
                id: node.id.clone(),
            }),
            Some(interval) if interval.is_inverted() => {
                violations.push(Violation::InvertedInterval {
                    id: node.id.clone(),
                    start: interval.start,
                    end: interval.end,
                })
            }
            Some(_) => {}
        }
    }

    let conflicts = find_conflicts(model);
    tracing::debug!(conflicts = conflicts.len(), "resource sweep finished");
    violations.extend(conflicts.into_iter().map(|c| Violation::ResourceConflict {
        resource_id: c.resource_id,
        node_a: c.node_a,
        node_b: c.node_b,
    }));
}
