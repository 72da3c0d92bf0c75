use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::{McpError, ToolError};
use crate::graphql::GraphQLClient;
use crate::introspection::{
    IntrospectionSchema, OperationKind, TypeKind, find_type, is_leaf_type, resolve_table_type,
    root_type_name, unwrap_type,
};
use crate::schema_cache::SchemaCache;
use crate::schema_from_type;
use crate::tools::{tool_result, validate_name};

/// The name of the tool to fetch a few rows of a table
pub const PREVIEW_TOOL_NAME: &str = "preview_table_data";

const FAILURE_LABEL: &str = "Error previewing table data";

/// Number of rows returned when no limit is given
const DEFAULT_LIMIT: i64 = 5;

#[derive(Clone)]
pub struct Preview {
    client: GraphQLClient,
    schema: SchemaCache,
    pub tool: Tool,
}

/// Input for the preview tool.
#[derive(JsonSchema, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    /// The name of the table
    table_name: String,
    /// Maximum number of rows to return. Defaults to 5.
    #[serde(default)]
    limit: Option<i64>,
}

impl Preview {
    pub fn new(client: GraphQLClient, schema: SchemaCache) -> Self {
        Self {
            client,
            schema,
            tool: Tool::new(
                PREVIEW_TOOL_NAME,
                "Fetch a few rows of a table to see what its data looks like. Only scalar and enum columns are selected.",
                schema_from_type!(Input),
            ),
        }
    }

    pub async fn execute(&self, input: Input) -> Result<CallToolResult, McpError> {
        Ok(tool_result(FAILURE_LABEL, self.preview(input).await))
    }

    async fn preview(&self, input: Input) -> Result<Value, ToolError> {
        let limit = input.limit.unwrap_or(DEFAULT_LIMIT);
        if limit <= 0 {
            return Err(ToolError::Invalid(format!(
                "Limit must be a positive integer, got {limit}"
            )));
        }
        validate_name("table", &input.table_name)?;

        let cached = self.schema.get_or_fetch(&self.client).await?;
        let query = preview_query(&cached.schema, &input.table_name, limit)?;
        Ok(self.client.execute(&query, None).await?)
    }
}

/// Build a query selecting the leaf columns of the first `limit` rows
fn preview_query(
    schema: &IntrospectionSchema,
    table_name: &str,
    limit: i64,
) -> Result<String, ToolError> {
    let table = resolve_table_type(schema, table_name, None)
        .filter(|table| table.kind == TypeKind::Object)
        .ok_or_else(|| ToolError::NotFound(format!("Table '{table_name}' not found in schema")))?;
    let table_name = table.name().unwrap_or(table_name);

    let query_root = root_type_name(schema, OperationKind::Query);
    let queryable = find_type(schema, query_root)
        .is_some_and(|root| root.fields().iter().any(|field| field.name == table_name));
    if !queryable {
        return Err(ToolError::NotFound(format!(
            "Table '{table_name}' has no field on the query root '{query_root}'"
        )));
    }

    let columns: Vec<&str> = table
        .fields()
        .iter()
        .filter(|field| is_leaf_type(unwrap_type(&field.ty).name, schema))
        .map(|field| field.name.as_str())
        .collect();
    if columns.is_empty() {
        return Err(ToolError::Invalid(format!(
            "Table '{table_name}' has no scalar or enum columns to preview"
        )));
    }

    Ok(format!(
        "query Preview {{ {table_name}(limit: {limit}) {{ {} }} }}",
        columns.join(" ")
    ))
}
