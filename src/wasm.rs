//! WASM entry points for browser use.

use wasm_bindgen::prelude::*;

use crate::config::ValidationConfig;
use crate::error::Violation;

/// Validate an editor submission JSON against a limits JSON (`""` for none).
/// Returns `{status: "valid" | "invalid" | "error", ...}`.
#[wasm_bindgen]
pub fn validate_graph(json: &str, config_json: &str) -> JsValue {
    let result = validate_graph_inner(json, config_json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn validate_graph_inner(json: &str, config_json: &str) -> ValidateResult {
    let config = if config_json.trim().is_empty() {
        ValidationConfig::unlimited()
    } else {
        match ValidationConfig::from_json(config_json) {
            Ok(c) => c,
            Err(e) => {
                return ValidateResult::Error {
                    message: format!("Failed to parse config JSON: {}", e),
                };
            }
        }
    };

    match crate::validate::validate_json(json, &config) {
        Ok(report) if report.is_valid() => ValidateResult::Valid,
        Ok(report) => ValidateResult::Invalid {
            violations: report.into_iter().map(ViolationDto::from).collect(),
        },
        Err(e) => ValidateResult::Error {
            message: e.to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ViolationDto {
    code: &'static str,
    stage: String,
    message: String,
    node_id: Option<String>,
    detail: Violation,
}

impl From<Violation> for ViolationDto {
    fn from(v: Violation) -> Self {
        ViolationDto {
            code: v.code(),
            stage: v.stage().to_string(),
            message: v.to_string(),
            node_id: v.node_id().map(|id| id.to_string()),
            detail: v,
        }
    }
}

#[derive(serde::Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
enum ValidateResult {
    Valid,
    Invalid { violations: Vec<ViolationDto> },
    Error { message: String },
}
