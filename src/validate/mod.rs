//! Graph validation phase.
//!
//! Builds a normalized [`GraphModel`] and runs every check against it:
//! construction repairs, dependency cycles, resource conflicts, then
//! structural limits. Violations from all stages are concatenated in that
//! order; nothing stops early.

pub mod cycle;
pub mod limits;
pub mod report;
pub mod resource;

pub use report::ValidationReport;

use crate::config::ValidationConfig;
use crate::error::{DecodeError, Violation};
use crate::parse::graph::GraphModel;
use crate::parse::types::{Edge, Node, ResourceId, Submission};

/// Validate raw nodes and edges against `config`.
pub fn validate(nodes: Vec<Node>, edges: Vec<Edge>, config: &ValidationConfig) -> ValidationReport {
    run(nodes, edges, None, config)
}

/// Validate a decoded submission, including its declared resource list.
pub fn validate_submission(submission: &Submission, config: &ValidationConfig) -> ValidationReport {
    run(
        submission.nodes.clone(),
        submission.edges.clone(),
        submission.resources.as_deref(),
        config,
    )
}

/// Decode editor JSON and validate it in one step.
pub fn validate_json(json: &str, config: &ValidationConfig) -> Result<ValidationReport, DecodeError> {
    let submission = crate::parse::parse(json)?;
    Ok(validate_submission(&submission, config))
}

/// Run the post-construction checks on an already built model.
pub fn validate_model(
    model: &GraphModel,
    declared: Option<&[ResourceId]>,
    config: &ValidationConfig,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    cycle::check_cycles(model, &mut violations);
    resource::check_resources(model, declared, &mut violations);
    limits::check_limits(model, config, &mut violations);
    violations
}

fn run(
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    declared: Option<&[ResourceId]>,
    config: &ValidationConfig,
) -> ValidationReport {
    let (model, mut violations) = GraphModel::build(nodes, edges);
    violations.extend(validate_model(&model, declared, config));

    tracing::debug!(
        nodes = model.node_count(),
        edges = model.edge_count(),
        violations = violations.len(),
        "graph validated"
    );

    ValidationReport { violations }
}
