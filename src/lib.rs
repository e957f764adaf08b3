pub mod config;
pub mod error;
pub mod parse;
pub mod validate;
pub mod wasm;

pub use config::ValidationConfig;
pub use error::{DecodeError, Stage, Violation};
pub use parse::{Edge, GraphModel, Interval, Node, NodeId, ResourceId, Submission, Timestamp};
pub use validate::{ValidationReport, validate, validate_json, validate_submission};
