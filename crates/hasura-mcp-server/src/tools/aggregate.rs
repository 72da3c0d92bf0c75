use std::fmt;

use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::errors::{McpError, ToolError};
use crate::graphql::GraphQLClient;
use crate::schema_from_type;
use crate::tools::{tool_result, validate_name};

/// The name of the tool to compute an aggregate over a table
pub const AGGREGATE_TOOL_NAME: &str = "aggregate_data";

const FAILURE_LABEL: &str = "Error aggregating data";

#[derive(Clone)]
pub struct Aggregate {
    client: GraphQLClient,
    pub tool: Tool,
}

/// Aggregate functions of the `<table>_aggregate` root field
#[derive(Clone, Copy, Debug, PartialEq, Eq, JsonSchema, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateFunction {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl fmt::Display for AggregateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AggregateFunction::Count => "count",
            AggregateFunction::Sum => "sum",
            AggregateFunction::Avg => "avg",
            AggregateFunction::Min => "min",
            AggregateFunction::Max => "max",
        })
    }
}

/// Input for the aggregate tool.
#[derive(JsonSchema, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    /// The name of the table
    table_name: String,
    /// The aggregate function to apply
    aggregate_function: AggregateFunction,
    /// The column to aggregate. Required unless the function is `count`.
    #[serde(default)]
    field: Option<String>,
    /// A boolean expression passed as the `where` argument, e.g. `{"status": {"_eq": "published"}}`
    #[serde(default)]
    filter: Option<Value>,
}

impl Aggregate {
    pub fn new(client: GraphQLClient) -> Self {
        Self {
            client,
            tool: Tool::new(
                AGGREGATE_TOOL_NAME,
                "Compute count, sum, avg, min or max over the rows of a table, optionally filtered with a boolean expression.",
                schema_from_type!(Input),
            ),
        }
    }

    pub async fn execute(&self, input: Input) -> Result<CallToolResult, McpError> {
        Ok(tool_result(FAILURE_LABEL, self.aggregate(input).await))
    }

    async fn aggregate(&self, input: Input) -> Result<Value, ToolError> {
        let query = aggregate_query(
            &input.table_name,
            input.aggregate_function,
            input.field.as_deref(),
        )?;
        let filter = match input.filter {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(filter @ Value::Object(_)) => filter,
            Some(_) => {
                return Err(ToolError::Invalid(
                    "Filter must be a JSON object".to_string(),
                ));
            }
        };
        Ok(self
            .client
            .execute(&query, Some(json!({ "where": filter })))
            .await?)
    }
}

fn aggregate_query(
    table_name: &str,
    function: AggregateFunction,
    field: Option<&str>,
) -> Result<String, ToolError> {
    validate_name("table", table_name)?;
    if let Some(field) = field {
        validate_name("field", field)?;
    }

    let selection = match (function, field) {
        (AggregateFunction::Count, None) => "count".to_string(),
        (AggregateFunction::Count, Some(field)) => format!("count(columns: {field})"),
        (function, Some(field)) => format!("{function} {{ {field} }}"),
        (function, None) => {
            return Err(ToolError::Invalid(format!(
                "A field is required for the '{function}' aggregate function"
            )));
        }
    };

    Ok(format!(
        "query Aggregate($where: {table_name}_bool_exp) {{ {table_name}_aggregate(where: $where) {{ aggregate {{ {selection} }} }} }}"
    ))
}
