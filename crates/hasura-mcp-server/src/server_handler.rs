use rmcp::model::{
    CallToolRequestParam, CallToolResult, ErrorCode, Implementation, InitializeRequestParam,
    InitializeResult, ListResourcesResult, ListToolsResult, PaginatedRequestParam,
    ReadResourceRequestParam, ReadResourceResult, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};
use serde_json::Value;
use tracing::debug;

use crate::errors::McpError;
use crate::graphql::GraphQLClient;
use crate::mutation::MutationMode;
use crate::resource::SchemaResource;
use crate::schema_cache::SchemaCache;
use crate::tools::aggregate::{AGGREGATE_TOOL_NAME, Aggregate};
use crate::tools::describe_table::{DESCRIBE_TABLE_TOOL_NAME, DescribeTable};
use crate::tools::describe_type::{DESCRIBE_TYPE_TOOL_NAME, DescribeType};
use crate::tools::health_check::{HEALTH_CHECK_TOOL_NAME, HealthCheck};
use crate::tools::list_root_fields::{LIST_ROOT_FIELDS_TOOL_NAME, ListRootFields};
use crate::tools::list_tables::{LIST_TABLES_TOOL_NAME, ListTables};
use crate::tools::preview::{PREVIEW_TOOL_NAME, Preview};
use crate::tools::run_query::{RUN_MUTATION_TOOL_NAME, RUN_QUERY_TOOL_NAME, RunMutation, RunQuery};

const SERVER_NAME: &str = "Hasura MCP Server";

/// Routes MCP requests to the tools and the schema resource.
///
/// All tools share one GraphQL client and one schema cache, so the schema is
/// introspected at most once per process.
#[derive(Clone)]
pub struct HasuraMcpServerHandler {
    health_check_tool: HealthCheck,
    list_tables_tool: ListTables,
    describe_table_tool: DescribeTable,
    list_root_fields_tool: ListRootFields,
    describe_type_tool: DescribeType,
    preview_tool: Preview,
    aggregate_tool: Aggregate,
    run_query_tool: RunQuery,
    run_mutation_tool: Option<RunMutation>,
    schema_resource: SchemaResource,
}

impl HasuraMcpServerHandler {
    pub fn new(client: GraphQLClient, mutation_mode: MutationMode) -> Self {
        Self::with_schema_cache(client, SchemaCache::new(), mutation_mode)
    }

    pub fn with_schema_cache(
        client: GraphQLClient,
        schema: SchemaCache,
        mutation_mode: MutationMode,
    ) -> Self {
        Self {
            health_check_tool: HealthCheck::new(client.clone(), schema.clone(), mutation_mode),
            list_tables_tool: ListTables::new(client.clone(), schema.clone()),
            describe_table_tool: DescribeTable::new(client.clone(), schema.clone()),
            list_root_fields_tool: ListRootFields::new(client.clone(), schema.clone()),
            describe_type_tool: DescribeType::new(client.clone(), schema.clone()),
            preview_tool: Preview::new(client.clone(), schema.clone()),
            aggregate_tool: Aggregate::new(client.clone()),
            run_query_tool: RunQuery::new(client.clone()),
            run_mutation_tool: mutation_mode
                .allows_mutations()
                .then(|| RunMutation::new(client.clone())),
            schema_resource: SchemaResource::new(client, schema),
        }
    }

    /// Run the tool named in `request`
    pub async fn dispatch(&self, request: CallToolRequestParam) -> Result<CallToolResult, McpError> {
        debug!(tool = %request.name, "Calling tool");
        match request.name.as_ref() {
            HEALTH_CHECK_TOOL_NAME => {
                self.health_check_tool
                    .execute(convert_arguments(request)?)
                    .await
            }
            LIST_TABLES_TOOL_NAME => {
                self.list_tables_tool
                    .execute(convert_arguments(request)?)
                    .await
            }
            DESCRIBE_TABLE_TOOL_NAME => {
                self.describe_table_tool
                    .execute(convert_arguments(request)?)
                    .await
            }
            LIST_ROOT_FIELDS_TOOL_NAME => {
                self.list_root_fields_tool
                    .execute(convert_arguments(request)?)
                    .await
            }
            DESCRIBE_TYPE_TOOL_NAME => {
                self.describe_type_tool
                    .execute(convert_arguments(request)?)
                    .await
            }
            PREVIEW_TOOL_NAME => self.preview_tool.execute(convert_arguments(request)?).await,
            AGGREGATE_TOOL_NAME => {
                self.aggregate_tool
                    .execute(convert_arguments(request)?)
                    .await
            }
            RUN_QUERY_TOOL_NAME => {
                self.run_query_tool
                    .execute(convert_arguments(request)?)
                    .await
            }
            RUN_MUTATION_TOOL_NAME => {
                self.run_mutation_tool
                    .as_ref()
                    .ok_or(tool_not_found(&request.name))?
                    .execute(convert_arguments(request)?)
                    .await
            }
            _ => Err(tool_not_found(&request.name)),
        }
    }

    /// The tools exposed to clients
    pub fn tools(&self) -> Vec<Tool> {
        [
            &self.health_check_tool.tool,
            &self.list_tables_tool.tool,
            &self.describe_table_tool.tool,
            &self.list_root_fields_tool.tool,
            &self.describe_type_tool.tool,
            &self.preview_tool.tool,
            &self.aggregate_tool.tool,
            &self.run_query_tool.tool,
        ]
        .into_iter()
        .chain(self.run_mutation_tool.as_ref().map(|tool| &tool.tool))
        .cloned()
        .collect()
    }
}

impl ServerHandler for HasuraMcpServerHandler {
    async fn initialize(
        &self,
        request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<InitializeResult, McpError> {
        debug!(client = %request.client_info.name, "Client connected");
        Ok(self.get_info())
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(request).await
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            next_cursor: None,
            tools: self.tools(),
        })
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            next_cursor: None,
            resources: vec![self.schema_resource.resource()],
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        Ok(ReadResourceResult {
            contents: vec![self.schema_resource.read(&request.uri).await?],
        })
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            instructions: Some(
                "Explore the schema with list_tables, describe_table and describe_graphql_type before writing queries for run_graphql_query."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}

fn tool_not_found(name: &str) -> McpError {
    McpError::new(
        ErrorCode::METHOD_NOT_FOUND,
        format!("Tool {name} not found"),
        None,
    )
}

/// Deserialize tool arguments, treating missing arguments as an empty object
fn convert_arguments<T: serde::de::DeserializeOwned>(
    arguments: CallToolRequestParam,
) -> Result<T, McpError> {
    serde_json::from_value(Value::Object(arguments.arguments.unwrap_or_default())).map_err(|e| {
        McpError::new(
            ErrorCode::INVALID_PARAMS,
            format!("Invalid input: {e}"),
            None,
        )
    })
}
