use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::{McpError, ToolError};
use crate::graphql::GraphQLClient;
use crate::introspection::{
    Argument, Field, IntrospectionSchema, OperationKind, find_type, render_type, root_type_name,
};
use crate::schema_cache::SchemaCache;
use crate::schema_from_type;
use crate::tools::tool_result;

/// The name of the tool to list the fields of a root operation type
pub const LIST_ROOT_FIELDS_TOOL_NAME: &str = "list_root_fields";

const FAILURE_LABEL: &str = "Error listing root fields";

#[derive(Clone)]
pub struct ListRootFields {
    client: GraphQLClient,
    schema: SchemaCache,
    pub tool: Tool,
}

/// Input for the list root fields tool.
#[derive(JsonSchema, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    /// The root operation to list fields of. Defaults to `QUERY`.
    #[serde(default)]
    field_type: Option<OperationKind>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RootFields<'a> {
    field_type: OperationKind,
    fields: Vec<RootField<'a>>,
}

#[derive(Debug, Serialize)]
struct RootField<'a> {
    name: &'a str,
    description: Option<&'a str>,
    #[serde(rename = "type")]
    ty: String,
    args: Vec<RootFieldArgument<'a>>,
}

#[derive(Debug, Serialize)]
struct RootFieldArgument<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    ty: String,
}

impl<'a> From<&'a Argument> for RootFieldArgument<'a> {
    fn from(argument: &'a Argument) -> Self {
        Self {
            name: &argument.name,
            ty: render_type(&argument.ty),
        }
    }
}

impl<'a> From<&'a Field> for RootField<'a> {
    fn from(field: &'a Field) -> Self {
        Self {
            name: &field.name,
            description: field.description.as_deref(),
            ty: render_type(&field.ty),
            args: field.args.iter().map(RootFieldArgument::from).collect(),
        }
    }
}

impl ListRootFields {
    pub fn new(client: GraphQLClient, schema: SchemaCache) -> Self {
        Self {
            client,
            schema,
            tool: Tool::new(
                LIST_ROOT_FIELDS_TOOL_NAME,
                "List the fields of the query, mutation or subscription root type along with their arguments.",
                schema_from_type!(Input),
            ),
        }
    }

    pub async fn execute(&self, input: Input) -> Result<CallToolResult, McpError> {
        let field_type = input.field_type.unwrap_or_default();
        let result = match self.schema.get_or_fetch(&self.client).await {
            Ok(cached) => root_fields(&cached.schema, field_type).and_then(|fields| {
                serde_json::to_value(fields).map_err(ToolError::from)
            }),
            Err(error) => Err(error.into()),
        };
        Ok(tool_result(FAILURE_LABEL, result))
    }
}

fn root_fields(
    schema: &IntrospectionSchema,
    field_type: OperationKind,
) -> Result<RootFields<'_>, ToolError> {
    let root_name = root_type_name(schema, field_type);
    let root = find_type(schema, root_name)
        .ok_or_else(|| ToolError::NotFound(format!("Root type '{root_name}' not found")))?;

    Ok(RootFields {
        field_type,
        fields: root.fields().iter().map(RootField::from).collect(),
    })
}
