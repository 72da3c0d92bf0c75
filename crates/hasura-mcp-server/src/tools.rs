//! MCP tools that expose the tables and types of a GraphQL backend.
//!
//! Every tool renders its own failures into the tool result, prefixed with a
//! per-tool label, so that errors reach the agent as text instead of
//! protocol faults.

pub(crate) mod aggregate;
pub(crate) mod describe_table;
pub(crate) mod describe_type;
pub(crate) mod health_check;
pub(crate) mod list_root_fields;
pub(crate) mod list_tables;
pub(crate) mod preview;
pub(crate) mod run_query;

use std::sync::OnceLock;

use regex::Regex;
use rmcp::model::{CallToolResult, Content};
use serde_json::Value;
use tracing::warn;

use crate::errors::ToolError;

/// Render the outcome of a tool, prefixing failures with `failure_label`
pub(crate) fn tool_result(failure_label: &str, result: Result<Value, ToolError>) -> CallToolResult {
    match result {
        Ok(value) => CallToolResult::success(vec![json_content(&value)]),
        Err(error) => {
            warn!(%error, "{failure_label}");
            CallToolResult::error(vec![Content::text(format!("{failure_label}: {error}"))])
        }
    }
}

fn json_content(value: &Value) -> Content {
    Content::text(serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()))
}

/// Check that `name` can be spliced into a document as a GraphQL name
#[allow(clippy::expect_used)]
pub(crate) fn validate_name(kind: &str, name: &str) -> Result<(), ToolError> {
    static NAME_PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = NAME_PATTERN
        .get_or_init(|| Regex::new(r"^[_A-Za-z][_0-9A-Za-z]*$").expect("regex pattern compiles"));
    if re.is_match(name) {
        Ok(())
    } else {
        Err(ToolError::Invalid(format!(
            "Invalid {kind} name '{name}': must be a GraphQL name"
        )))
    }
}
