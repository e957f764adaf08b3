use graphlint::*;

// =============================================================================
// Graph input builders
// =============================================================================

pub fn node(id: &str) -> Node {
    Node::new(id)
}

/// A node booked on `resource` for `[start, end)`.
pub fn task(id: &str, resource: &str, start: i64, end: i64) -> Node {
    Node::new(id).with_resource(resource).with_interval(start, end)
}

pub fn child(id: &str, parent: &str) -> Node {
    Node::new(id).with_parent(parent)
}

pub fn nodes(ids: &[&str]) -> Vec<Node> {
    ids.iter().map(|id| Node::new(*id)).collect()
}

pub fn edges(pairs: &[(&str, &str)]) -> Vec<Edge> {
    pairs.iter().map(|&(s, t)| Edge::new(s, t)).collect()
}

pub fn ids(names: &[&str]) -> Vec<NodeId> {
    names.iter().map(|n| NodeId::from(*n)).collect()
}

pub fn unlimited() -> ValidationConfig {
    ValidationConfig::unlimited()
}

// =============================================================================
// Report assertions
// =============================================================================

pub fn assert_has_code(report: &ValidationReport, code: &str) {
    assert!(
        report.iter().any(|v| v.code() == code),
        "Expected violation {}, got: {:?}",
        code,
        report
    );
}

pub fn assert_no_code(report: &ValidationReport, code: &str) {
    assert!(
        !report.iter().any(|v| v.code() == code),
        "Did not expect violation {}, but got: {:?}",
        code,
        report
    );
}

pub fn count_code(report: &ValidationReport, code: &str) -> usize {
    report.iter().filter(|v| v.code() == code).count()
}

pub fn witness(report: &ValidationReport) -> Option<&[NodeId]> {
    report.iter().find_map(|v| match v {
        Violation::CycleDetected { witness } => Some(witness.as_slice()),
        _ => None,
    })
}

/// Every consecutive pair in `witness` must be a real edge, and it must close.
pub fn assert_valid_witness(witness: &[NodeId], edges: &[Edge]) {
    assert!(witness.len() >= 3, "witness too short: {:?}", witness);
    assert_eq!(witness.first(), witness.last(), "witness must close: {:?}", witness);
    for pair in witness.windows(2) {
        assert!(
            edges
                .iter()
                .any(|e| e.source == pair[0] && e.target == pair[1]),
            "witness step {} -> {} is not an edge",
            pair[0],
            pair[1]
        );
    }
}
