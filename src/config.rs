//! Size ceilings applied to interactively edited graphs.

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Caller-supplied limits. Absent fields mean "no limit".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationConfig {
    #[serde(alias = "max_nodes")]
    pub max_nodes: usize,
    #[serde(alias = "max_edges")]
    pub max_edges: usize,
    /// Deepest allowed `parent_id` nesting; roots sit at depth 0.
    #[serde(alias = "max_depth")]
    pub max_depth: Option<usize>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self::unlimited()
    }
}

impl ValidationConfig {
    pub fn unlimited() -> Self {
        ValidationConfig {
            max_nodes: usize::MAX,
            max_edges: usize::MAX,
            max_depth: None,
        }
    }

    pub fn with_max_nodes(mut self, limit: usize) -> Self {
        self.max_nodes = limit;
        self
    }

    pub fn with_max_edges(mut self, limit: usize) -> Self {
        self.max_edges = limit;
        self
    }

    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, DecodeError> {
        Ok(serde_json::from_str(json)?)
    }
}
