use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::{McpError, ToolError};
use crate::graphql::GraphQLClient;
use crate::introspection::{
    Field, IntrospectionSchema, TypeKind, render_type, resolve_table_type, unwrap_type,
};
use crate::schema_cache::SchemaCache;
use crate::schema_from_type;
use crate::tools::tool_result;

/// The name of the tool to describe the columns of a table
pub const DESCRIBE_TABLE_TOOL_NAME: &str = "describe_table";

const FAILURE_LABEL: &str = "Error describing table";

#[derive(Clone)]
pub struct DescribeTable {
    client: GraphQLClient,
    schema: SchemaCache,
    pub tool: Tool,
}

/// Input for the describe table tool.
#[derive(JsonSchema, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    /// The name of the table
    table_name: String,
    /// The database schema of the table, for tables outside the default schema
    #[serde(default)]
    schema_name: Option<String>,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TableDescription<'a> {
    table_name: &'a str,
    fields: Vec<FieldDescription<'a>>,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FieldDescription<'a> {
    name: &'a str,
    description: Option<&'a str>,
    #[serde(rename = "type")]
    ty: String,
    is_list: bool,
    is_nullable: bool,
}

impl<'a> From<&'a Field> for FieldDescription<'a> {
    fn from(field: &'a Field) -> Self {
        let unwrapped = unwrap_type(&field.ty);
        Self {
            name: &field.name,
            description: field.description.as_deref(),
            ty: render_type(&field.ty),
            is_list: unwrapped.is_list,
            is_nullable: !unwrapped.is_non_null,
        }
    }
}

impl DescribeTable {
    pub fn new(client: GraphQLClient, schema: SchemaCache) -> Self {
        Self {
            client,
            schema,
            tool: Tool::new(
                DESCRIBE_TABLE_TOOL_NAME,
                "Describe the columns and relationships of a table, including their GraphQL types and nullability.",
                schema_from_type!(Input),
            ),
        }
    }

    pub async fn execute(&self, input: Input) -> Result<CallToolResult, McpError> {
        let result = match self.schema.get_or_fetch(&self.client).await {
            Ok(cached) => describe_table(
                &cached.schema,
                &input.table_name,
                input.schema_name.as_deref(),
            )
            .and_then(|description| serde_json::to_value(description).map_err(ToolError::from)),
            Err(error) => Err(error.into()),
        };
        Ok(tool_result(FAILURE_LABEL, result))
    }
}

pub(crate) fn describe_table<'a>(
    schema: &'a IntrospectionSchema,
    table_name: &str,
    schema_name: Option<&str>,
) -> Result<TableDescription<'a>, ToolError> {
    let table = resolve_table_type(schema, table_name, schema_name)
        .ok_or_else(|| ToolError::NotFound(format!("Table '{table_name}' not found in schema")))?;
    let name = table.name().unwrap_or(table_name);
    if table.kind != TypeKind::Object {
        return Err(ToolError::NotFound(format!(
            "'{name}' is a {} type, not a table",
            table.kind
        )));
    }

    Ok(TableDescription {
        table_name: table.name().unwrap_or_default(),
        fields: table.fields().iter().map(FieldDescription::from).collect(),
    })
}
