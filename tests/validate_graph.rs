//! Integration tests for the validation façade: every stage, one report.

#[allow(dead_code)]
mod helpers;

use graphlint::{Node, NodeId, ValidationConfig, Violation, validate, validate_json};
use helpers::*;

// =============================================================================
// Reference scenarios
// =============================================================================

#[test]
fn triangle_reports_single_cycle() {
    let report = validate(
        nodes(&["A", "B", "C"]),
        edges(&[("A", "B"), ("B", "C"), ("C", "A")]),
        &unlimited(),
    );
    assert_eq!(
        report.violations,
        vec![Violation::CycleDetected {
            witness: ids(&["A", "B", "C", "A"])
        }]
    );
    insta::assert_snapshot!(report.to_string(), @"[Cycle:G006] Dependency cycle: A -> B -> C -> A");
}

#[test]
fn overlapping_tasks_on_one_resource() {
    let report = validate(
        vec![
            task("T1", "r1", 0, 5),
            task("T2", "r1", 3, 8),
            task("T3", "r2", 0, 100),
        ],
        vec![],
        &unlimited(),
    );
    assert_eq!(
        report.violations,
        vec![Violation::ResourceConflict {
            resource_id: "r1".into(),
            node_a: "T1".into(),
            node_b: "T2".into(),
        }]
    );
}

#[test]
fn node_limit_exceeded() {
    let config = ValidationConfig::unlimited().with_max_nodes(2);
    let report = validate(nodes(&["a", "b", "c"]), vec![], &config);
    insta::assert_json_snapshot!(report, @r#"
    {
      "violations": [
        {
          "kind": "tooManyNodes",
          "count": 3,
          "limit": 2
        }
      ]
    }
    "#);
}

#[test]
fn back_to_back_tasks_do_not_conflict() {
    let report = validate(
        vec![task("a", "r", 0, 10), task("b", "r", 10, 20)],
        vec![],
        &unlimited(),
    );
    assert!(report.is_valid(), "unexpected: {}", report);

    let report = validate(
        vec![task("a", "r", 0, 10), task("b", "r", 9, 20)],
        vec![],
        &unlimited(),
    );
    assert_eq!(count_code(&report, "G010"), 1);
}

// =============================================================================
// Collect-all behavior
// =============================================================================

#[test]
fn dangling_edge_does_not_hide_cycle() {
    let report = validate(
        nodes(&["a", "b", "c", "d"]),
        edges(&[("a", "b"), ("b", "c"), ("c", "ghost"), ("c", "a"), ("c", "d")]),
        &unlimited(),
    );
    assert_eq!(count_code(&report, "G002"), 1);
    assert_eq!(witness(&report), Some(ids(&["a", "b", "c", "a"]).as_slice()));
    assert_eq!(report.len(), 2);
}

#[test]
fn every_stage_contributes_in_order() {
    let config = ValidationConfig::unlimited()
        .with_max_nodes(3)
        .with_max_edges(1)
        .with_max_depth(0);
    let report = validate(
        vec![
            task("a", "r", 0, 10),
            task("a", "r", 0, 10),
            task("b", "r", 5, 15),
            Node::new("c").with_resource("r"),
            child("d", "a"),
        ],
        edges(&[("a", "b"), ("b", "a"), ("b", "zzz")]),
        &config,
    );
    assert_eq!(
        report.codes(),
        vec!["G001", "G002", "G006", "G007", "G010", "G011", "G012", "G013"]
    );
}

#[test]
fn validation_is_deterministic() {
    let build = || {
        validate(
            vec![
                task("x", "r", 0, 50),
                task("y", "r", 10, 20),
                task("z", "r", 15, 60),
                child("w", "x"),
            ],
            edges(&[("x", "y"), ("y", "z"), ("z", "x"), ("w", "nowhere")]),
            &ValidationConfig::unlimited().with_max_depth(0),
        )
    };
    let first = build();
    let second = build();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn parent_loops_only_checked_with_depth_limit() {
    let tree = || vec![child("a", "b"), child("b", "a"), node("root")];

    let report = validate(tree(), vec![], &unlimited());
    assert!(report.is_valid());

    let report = validate(tree(), vec![], &ValidationConfig::unlimited().with_max_depth(5));
    assert_eq!(
        report.violations,
        vec![Violation::SelfReferentialParent {
            node_id: "a".into()
        }]
    );
}

// =============================================================================
// Editor submissions
// =============================================================================

#[test]
fn planning_board_double_booking() {
    let json = include_str!("fixtures/planning_board.json");
    let report = validate_json(json, &unlimited()).expect("Should decode");
    assert_eq!(
        report.violations,
        vec![Violation::ResourceConflict {
            resource_id: "alice".into(),
            node_a: NodeId::Int(2),
            node_b: NodeId::Int(3),
        }]
    );
}

#[test]
fn planning_board_nesting_limit() {
    let json = include_str!("fixtures/planning_board.json");
    let config = ValidationConfig::unlimited().with_max_depth(0);
    let report = validate_json(json, &config).expect("Should decode");
    let nested: Vec<String> = report
        .iter()
        .filter_map(|v| match v {
            Violation::DepthExceeded { node_id, depth, .. } => {
                Some(format!("{}@{}", node_id, depth))
            }
            _ => None,
        })
        .collect();
    assert_eq!(nested, vec!["2@1", "3@1", "4@1"]);
}

#[test]
fn undeclared_board_resource() {
    let json = r#"{
        "tasks": [
            {"id": 1, "resource": "carol", "start_date": 0, "end_date": 10}
        ],
        "resources": [{"id": "alice"}]
    }"#;
    let report = validate_json(json, &unlimited()).unwrap();
    assert_eq!(
        report.violations,
        vec![Violation::UnknownResource {
            id: NodeId::Int(1),
            resource_id: "carol".into(),
        }]
    );
}

#[test]
fn workflow_designer_is_valid() {
    let json = include_str!("fixtures/workflow_designer.json");
    let report = validate_json(json, &unlimited()).unwrap();
    assert!(report.is_valid(), "Expected no violations, got: {}", report);
    assert_eq!(report.to_string(), "valid");
}

#[test]
fn workflow_loop_with_dangling_link() {
    let json = include_str!("fixtures/workflow_loop.json");
    let report = validate_json(json, &unlimited()).unwrap();
    insta::assert_snapshot!(report.to_string(), @r"
    [Normalize:G002] Edge 'publish' -> 'archive' references a node that does not exist
    [Cycle:G006] Dependency cycle: draft -> review -> draft
    ");
}

#[test]
fn schema_tree_depth() {
    let json = include_str!("fixtures/schema_tree.json");
    let config = ValidationConfig::unlimited().with_max_depth(2);
    let report = validate_json(json, &config).unwrap();
    assert_eq!(
        report.violations,
        vec![
            Violation::DepthExceeded {
                node_id: "users.email".into(),
                depth: 3,
                limit: 2,
            },
            Violation::DepthExceeded {
                node_id: "orders.user_id".into(),
                depth: 3,
                limit: 2,
            },
        ]
    );
}

#[test]
fn malformed_json_is_a_decode_error() {
    assert!(validate_json("{\"nodes\": 5}", &unlimited()).is_err());
}

#[test]
fn report_round_trips_through_json() {
    let report = validate(
        vec![task("a", "r", 0, 10), task("b", "r", 5, 15)],
        edges(&[("a", "a")]),
        &unlimited(),
    );
    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains(r#""kind":"resourceConflict""#), "{}", json);
    assert!(json.contains(r#""nodeA":"a""#), "{}", json);
    let back: graphlint::ValidationReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, report);
}
