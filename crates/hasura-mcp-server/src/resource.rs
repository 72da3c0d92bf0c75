//! The introspected schema exposed as an MCP resource

use rmcp::model::{AnnotateAble, ErrorCode, RawResource, Resource, ResourceContents};

use crate::errors::McpError;
use crate::graphql::GraphQLClient;
use crate::schema_cache::SchemaCache;

/// URI of the schema resource
pub const SCHEMA_RESOURCE_URI: &str = "hasura:/schema";

const SCHEMA_RESOURCE_NAME: &str = "GraphQL schema";
const SCHEMA_MIME_TYPE: &str = "application/json";

/// Serves the full introspection schema as pretty-printed JSON
#[derive(Clone)]
pub struct SchemaResource {
    client: GraphQLClient,
    schema: SchemaCache,
}

impl SchemaResource {
    pub fn new(client: GraphQLClient, schema: SchemaCache) -> Self {
        Self { client, schema }
    }

    pub fn resource(&self) -> Resource {
        let mut resource = RawResource::new(SCHEMA_RESOURCE_URI, SCHEMA_RESOURCE_NAME);
        resource.description =
            Some("The introspection result of the GraphQL endpoint, including every type".into());
        resource.mime_type = Some(SCHEMA_MIME_TYPE.into());
        resource.no_annotation()
    }

    pub async fn read(&self, uri: &str) -> Result<ResourceContents, McpError> {
        if uri != SCHEMA_RESOURCE_URI {
            return Err(McpError::new(
                ErrorCode::RESOURCE_NOT_FOUND,
                format!("Resource {uri} not found"),
                None,
            ));
        }

        let cached = self
            .schema
            .get_or_fetch(&self.client)
            .await
            .map_err(|e| {
                McpError::new(
                    ErrorCode::INTERNAL_ERROR,
                    format!("Error fetching schema: {e}"),
                    None,
                )
            })?;
        let text = serde_json::to_string_pretty(&cached.raw).map_err(|e| {
            McpError::new(
                ErrorCode::INTERNAL_ERROR,
                format!("Error serializing schema: {e}"),
                None,
            )
        })?;
        Ok(ResourceContents::text(text, uri))
    }
}
