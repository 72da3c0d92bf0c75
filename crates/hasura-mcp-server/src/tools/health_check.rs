use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::errors::{McpError, ToolError};
use crate::graphql::GraphQLClient;
use crate::introspection::{OperationKind, find_type, is_table_type, root_type_name};
use crate::mutation::MutationMode;
use crate::schema_cache::SchemaCache;
use crate::schema_from_type;
use crate::tools::tool_result;

/// The name of the tool to check connectivity with the GraphQL endpoint
pub const HEALTH_CHECK_TOOL_NAME: &str = "health_check";

const FAILURE_LABEL: &str = "Health check failed";

/// Query used to probe the endpoint when no health URL is given
const PROBE_QUERY: &str = "query { __typename }";

#[derive(Clone)]
pub struct HealthCheck {
    client: GraphQLClient,
    schema: SchemaCache,
    mutation_mode: MutationMode,
    pub tool: Tool,
}

/// Input for the health check tool.
#[derive(JsonSchema, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    /// A health endpoint to GET instead of probing the GraphQL endpoint, e.g. `http://localhost:8080/healthz`
    #[serde(default)]
    health_endpoint_url: Option<String>,
}

impl HealthCheck {
    pub fn new(client: GraphQLClient, schema: SchemaCache, mutation_mode: MutationMode) -> Self {
        Self {
            client,
            schema,
            mutation_mode,
            tool: Tool::new(
                HEALTH_CHECK_TOOL_NAME,
                "Check that the GraphQL backend is reachable. Optionally pass a health endpoint URL to query it directly; otherwise a trivial query is sent to the GraphQL endpoint.",
                schema_from_type!(Input),
            ),
        }
    }

    pub async fn execute(&self, input: Input) -> Result<CallToolResult, McpError> {
        let result = match input.health_endpoint_url {
            Some(url) => self.check_url(&url).await,
            None => self.probe().await,
        };
        Ok(tool_result(FAILURE_LABEL, result))
    }

    async fn check_url(&self, url: &str) -> Result<Value, ToolError> {
        let (status, body) = self.client.get_text(url).await?;
        Ok(json!({
            "status": status.as_u16(),
            "body": body,
        }))
    }

    async fn probe(&self) -> Result<Value, ToolError> {
        let response = self.client.execute(PROBE_QUERY, None).await?;

        let mut warnings = Vec::new();
        let has_mutation_fields = match self.schema.get_or_fetch(&self.client).await {
            Ok(cached) => {
                let schema = &cached.schema;
                let has_mutation_fields =
                    find_type(schema, root_type_name(schema, OperationKind::Mutation))
                        .is_some_and(|root| !root.fields().is_empty());
                if has_mutation_fields && !self.mutation_mode.allows_mutations() {
                    warnings.push(
                        "The schema exposes mutations, but the server only allows read operations"
                            .to_string(),
                    );
                }
                if !schema.types.iter().any(is_table_type) {
                    warnings.push("No tables were found in the schema".to_string());
                }
                has_mutation_fields
            }
            Err(error) => {
                warnings.push(format!("Could not introspect the schema: {error}"));
                false
            }
        };

        Ok(json!({
            "data": response.get("data").cloned().unwrap_or(Value::Null),
            "hasMutationFields": has_mutation_fields,
            "warnings": warnings,
        }))
    }
}
