use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::{McpError, ToolError};
use crate::graphql::GraphQLClient;
use crate::introspection::{
    EnumValue, Field, InputValue, IntrospectionSchema, TypeKind, find_type, render_type,
};
use crate::schema_cache::SchemaCache;
use crate::schema_from_type;
use crate::tools::tool_result;

/// The name of the tool to describe any named type of the schema
pub const DESCRIBE_TYPE_TOOL_NAME: &str = "describe_graphql_type";

const FAILURE_LABEL: &str = "Error describing type";

#[derive(Clone)]
pub struct DescribeType {
    client: GraphQLClient,
    schema: SchemaCache,
    pub tool: Tool,
}

/// Input for the describe type tool.
#[derive(JsonSchema, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    /// The exact name of the type, e.g. `authors_bool_exp`
    type_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TypeDescription<'a> {
    name: &'a str,
    kind: TypeKind,
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<MemberDescription<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    enum_values: Option<Vec<EnumValueDescription<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    input_fields: Option<Vec<MemberDescription<'a>>>,
}

#[derive(Debug, Serialize)]
struct MemberDescription<'a> {
    name: &'a str,
    description: Option<&'a str>,
    #[serde(rename = "type")]
    ty: String,
}

#[derive(Debug, Serialize)]
struct EnumValueDescription<'a> {
    name: &'a str,
    description: Option<&'a str>,
}

impl<'a> From<&'a Field> for MemberDescription<'a> {
    fn from(field: &'a Field) -> Self {
        Self {
            name: &field.name,
            description: field.description.as_deref(),
            ty: render_type(&field.ty),
        }
    }
}

impl<'a> From<&'a InputValue> for MemberDescription<'a> {
    fn from(input: &'a InputValue) -> Self {
        Self {
            name: &input.name,
            description: input.description.as_deref(),
            ty: render_type(&input.ty),
        }
    }
}

impl<'a> From<&'a EnumValue> for EnumValueDescription<'a> {
    fn from(value: &'a EnumValue) -> Self {
        Self {
            name: &value.name,
            description: value.description.as_deref(),
        }
    }
}

impl DescribeType {
    pub fn new(client: GraphQLClient, schema: SchemaCache) -> Self {
        Self {
            client,
            schema,
            tool: Tool::new(
                DESCRIBE_TYPE_TOOL_NAME,
                "Describe a GraphQL type by name, such as a filter input, an enum or an aggregate type. Lists its fields, input fields or enum values.",
                schema_from_type!(Input),
            ),
        }
    }

    pub async fn execute(&self, input: Input) -> Result<CallToolResult, McpError> {
        let result = match self.schema.get_or_fetch(&self.client).await {
            Ok(cached) => describe_type(&cached.schema, &input.type_name).and_then(|description| {
                serde_json::to_value(description).map_err(ToolError::from)
            }),
            Err(error) => Err(error.into()),
        };
        Ok(tool_result(FAILURE_LABEL, result))
    }
}

fn describe_type<'a>(
    schema: &'a IntrospectionSchema,
    type_name: &str,
) -> Result<TypeDescription<'a>, ToolError> {
    let named_type = find_type(schema, type_name)
        .ok_or_else(|| ToolError::NotFound(format!("Type '{type_name}' not found in schema")))?;

    Ok(TypeDescription {
        name: named_type.name().unwrap_or_default(),
        kind: named_type.kind,
        description: named_type.description.as_deref(),
        fields: named_type
            .fields
            .as_ref()
            .map(|fields| fields.iter().map(MemberDescription::from).collect()),
        enum_values: named_type
            .enum_values
            .as_ref()
            .map(|values| values.iter().map(EnumValueDescription::from).collect()),
        input_fields: named_type
            .input_fields
            .as_ref()
            .map(|fields| fields.iter().map(MemberDescription::from).collect()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures;
    use crate::tools::test_support::{is_error, json, text};
    use serde_json::json;
    use url::Url;

    fn tool() -> DescribeType {
        let client = GraphQLClient::builder()
            .endpoint(Url::parse("http://127.0.0.1:1").unwrap())
            .build()
            .unwrap();
        DescribeType::new(client, test_fixtures::schema_cache())
    }

    async fn describe(type_name: &str) -> CallToolResult {
        tool()
            .execute(Input {
                type_name: type_name.to_string(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn describes_input_objects() {
        let result = describe("authors_bool_exp").await;

        assert!(!is_error(&result));
        assert_eq!(
            json(&result),
            json!({
                "name": "authors_bool_exp",
                "kind": "INPUT_OBJECT",
                "description": "Boolean expression to filter rows from the table \"authors\"",
                "inputFields": [
                    { "name": "name", "description": null, "type": "String_comparison_exp" },
                    { "name": "_and", "description": null, "type": "[authors_bool_exp!]" },
                ]
            })
        );
    }

    #[tokio::test]
    async fn describes_enums() {
        let result = describe("article_status").await;

        assert_eq!(
            json(&result),
            json!({
                "name": "article_status",
                "kind": "ENUM",
                "description": null,
                "enumValues": [
                    { "name": "draft", "description": null },
                    { "name": "published", "description": "visible to readers" },
                ]
            })
        );
    }

    #[tokio::test]
    async fn describes_objects() {
        let result = describe("authors_aggregate_fields").await;

        assert_eq!(
            json(&result),
            json!({
                "name": "authors_aggregate_fields",
                "kind": "OBJECT",
                "description": null,
                "fields": [
                    { "name": "count", "description": null, "type": "Int!" },
                ]
            })
        );
    }

    #[tokio::test]
    async fn scalars_have_no_members() {
        let description = json(&describe("uuid").await);

        assert_eq!(
            description,
            json!({ "name": "uuid", "kind": "SCALAR", "description": null })
        );
    }

    #[tokio::test]
    async fn lookup_is_case_sensitive() {
        let result = describe("Authors_Bool_Exp").await;

        assert!(is_error(&result));
        assert_eq!(
            text(&result),
            "Error describing type: Type 'Authors_Bool_Exp' not found in schema"
        );
    }
}
