use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::errors::{McpError, ToolError};
use crate::graphql::GraphQLClient;
use crate::introspection::{IntrospectionSchema, NamedType, is_table_type};
use crate::schema_cache::SchemaCache;
use crate::schema_from_type;
use crate::tools::tool_result;

/// The name of the tool to list the tables of the schema
pub const LIST_TABLES_TOOL_NAME: &str = "list_tables";

const FAILURE_LABEL: &str = "Error listing tables";

#[derive(Clone)]
pub struct ListTables {
    client: GraphQLClient,
    schema: SchemaCache,
    pub tool: Tool,
}

/// Input for the list tables tool.
#[derive(JsonSchema, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    /// The database schema to list tables from. Currently all tables are listed.
    #[serde(default)]
    #[allow(dead_code)]
    schema_name: Option<String>,
}

impl ListTables {
    pub fn new(client: GraphQLClient, schema: SchemaCache) -> Self {
        Self {
            client,
            schema,
            tool: Tool::new(
                LIST_TABLES_TOOL_NAME,
                "List the tables that can be queried, sorted by name. Use `describe_table` to get the columns of a table.",
                schema_from_type!(Input),
            ),
        }
    }

    pub async fn execute(&self, _input: Input) -> Result<CallToolResult, McpError> {
        let result = self
            .schema
            .get_or_fetch(&self.client)
            .await
            .map_err(ToolError::from)
            .map(|cached| json!({ "tables": table_names(&cached.schema) }));
        Ok(tool_result(FAILURE_LABEL, result))
    }
}

/// Names of all table types in ascending order
pub(crate) fn table_names(schema: &IntrospectionSchema) -> Vec<&str> {
    let mut tables: Vec<&str> = schema
        .types
        .iter()
        .filter(|named_type| is_table_type(named_type))
        .filter_map(NamedType::name)
        .collect();
    tables.sort_unstable();
    tables
}
