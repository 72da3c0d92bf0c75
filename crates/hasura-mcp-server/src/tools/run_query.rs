use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::{McpError, ToolError};
use crate::graphql::GraphQLClient;
use crate::mutation::is_mutation;
use crate::schema_from_type;
use crate::tools::tool_result;

/// The name of the tool to run an ad hoc read operation
pub const RUN_QUERY_TOOL_NAME: &str = "run_graphql_query";

/// The name of the tool to run an ad hoc mutation
pub const RUN_MUTATION_TOOL_NAME: &str = "run_graphql_mutation";

const QUERY_FAILURE_LABEL: &str = "Error running query";
const MUTATION_FAILURE_LABEL: &str = "Error running mutation";

/// Input for the run query and run mutation tools.
#[derive(JsonSchema, Deserialize)]
pub struct Input {
    /// The GraphQL document
    query: String,

    /// The variable values, as a JSON object or a JSON-encoded string
    #[serde(default)]
    variables: Option<Value>,
}

impl Input {
    fn variables(&self) -> Result<Option<Value>, ToolError> {
        match &self.variables {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => match serde_json::from_str::<Value>(s) {
                Ok(Value::Null) => Ok(None),
                Ok(obj) if obj.is_object() => Ok(Some(obj)),
                _ => Err(ToolError::Invalid(
                    "Variables must be a JSON object".to_string(),
                )),
            },
            Some(obj) if obj.is_object() => Ok(Some(obj.clone())),
            Some(_) => Err(ToolError::Invalid(
                "Variables must be a JSON object".to_string(),
            )),
        }
    }
}

#[derive(Clone)]
pub struct RunQuery {
    client: GraphQLClient,
    pub tool: Tool,
}

impl RunQuery {
    pub fn new(client: GraphQLClient) -> Self {
        Self {
            client,
            tool: Tool::new(
                RUN_QUERY_TOOL_NAME,
                "Run a read-only GraphQL query against the backend. Use `list_tables`, `describe_table` and `describe_graphql_type` to learn the schema first. Mutations are rejected.",
                schema_from_type!(Input),
            ),
        }
    }

    pub async fn execute(&self, input: Input) -> Result<CallToolResult, McpError> {
        Ok(tool_result(QUERY_FAILURE_LABEL, self.run(input).await))
    }

    async fn run(&self, input: Input) -> Result<Value, ToolError> {
        if is_mutation(&input.query) {
            return Err(ToolError::Invalid(
                "Mutations are not allowed, only read operations can be run with this tool"
                    .to_string(),
            ));
        }
        let variables = input.variables()?;
        Ok(self.client.execute(&input.query, variables).await?)
    }
}

#[derive(Clone)]
pub struct RunMutation {
    client: GraphQLClient,
    pub tool: Tool,
}

impl RunMutation {
    pub fn new(client: GraphQLClient) -> Self {
        Self {
            client,
            tool: Tool::new(
                RUN_MUTATION_TOOL_NAME,
                "Run a GraphQL mutation against the backend. Use `list_root_fields` with `MUTATION` to see the available mutations. Only mutation documents are accepted.",
                schema_from_type!(Input),
            ),
        }
    }

    pub async fn execute(&self, input: Input) -> Result<CallToolResult, McpError> {
        Ok(tool_result(MUTATION_FAILURE_LABEL, self.run(input).await))
    }

    async fn run(&self, input: Input) -> Result<Value, ToolError> {
        if !is_mutation(&input.query) {
            return Err(ToolError::Invalid(
                "Only mutations can be run with this tool, use run_graphql_query for reads"
                    .to_string(),
            ));
        }
        let variables = input.variables()?;
        Ok(self.client.execute(&input.query, variables).await?)
    }
}
