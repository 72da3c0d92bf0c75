//! Process-wide cache of the introspected schema

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::errors::GraphQLError;
use crate::graphql::GraphQLClient;
use crate::introspection::{INTROSPECTION_QUERY, IntrospectionSchema};

/// An introspected schema along with the document it was parsed from
#[derive(Debug)]
pub struct CachedSchema {
    /// The `__schema` object exactly as returned by the endpoint
    pub raw: Value,
    pub schema: IntrospectionSchema,
}

/// Holds the schema once it has been fetched.
///
/// The first successful fetch wins and is never refreshed. Concurrent
/// callers wait on the same fetch, and a failed fetch leaves the cache empty
/// so a later call can retry.
#[derive(Clone, Debug, Default)]
pub struct SchemaCache {
    cell: Arc<OnceCell<Arc<CachedSchema>>>,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache that is already populated
    pub fn with_schema(schema: CachedSchema) -> Self {
        Self {
            cell: Arc::new(OnceCell::new_with(Some(Arc::new(schema)))),
        }
    }

    /// The cached schema, if it has been fetched
    pub fn get(&self) -> Option<Arc<CachedSchema>> {
        self.cell.get().cloned()
    }

    pub async fn get_or_fetch(
        &self,
        client: &GraphQLClient,
    ) -> Result<Arc<CachedSchema>, GraphQLError> {
        self.cell
            .get_or_try_init(|| fetch_schema(client))
            .await
            .cloned()
    }
}

/// Run the introspection query and parse the result
pub async fn fetch_schema(client: &GraphQLClient) -> Result<Arc<CachedSchema>, GraphQLError> {
    info!(endpoint = %client.endpoint(), "Fetching GraphQL schema");
    let response = client.execute(INTROSPECTION_QUERY, None).await?;
    let raw = response
        .get("data")
        .and_then(|data| data.get("__schema"))
        .filter(|schema| !schema.is_null())
        .cloned()
        .ok_or(GraphQLError::MissingSchema)?;
    let schema: IntrospectionSchema =
        serde_json::from_value(raw.clone()).map_err(GraphQLError::InvalidSchema)?;
    debug!(types = schema.types.len(), "Fetched GraphQL schema");
    Ok(Arc::new(CachedSchema { raw, schema }))
}

impl CachedSchema {
    /// Parse a `__schema` object
    pub fn from_raw(raw: Value) -> Result<Self, GraphQLError> {
        let schema = serde_json::from_value(raw.clone()).map_err(GraphQLError::InvalidSchema)?;
        Ok(Self { raw, schema })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures;
    use url::Url;

    fn client(url: &str) -> GraphQLClient {
        GraphQLClient::builder()
            .endpoint(Url::parse(url).unwrap())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn fetches_schema_only_once() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(test_fixtures::introspection_response().to_string())
            .expect(1)
            .create_async()
            .await;
        let client = client(&server.url());
        let cache = SchemaCache::new();

        let (first, second) = tokio::join!(cache.get_or_fetch(&client), cache.get_or_fetch(&client));
        let third = cache.get_or_fetch(&client).await.unwrap();

        mock.assert_async().await;
        let first = first.unwrap();
        assert!(Arc::ptr_eq(&first, &second.unwrap()));
        assert!(Arc::ptr_eq(&first, &third));
        assert_eq!(
            first.schema.query_type.as_ref().map(|root| root.name.as_str()),
            Some("query_root")
        );
    }

    #[tokio::test]
    async fn failed_fetch_can_be_retried() {
        let mut server = mockito::Server::new_async().await;
        let failing = server
            .mock("POST", "/")
            .with_status(500)
            .with_body("unavailable")
            .create_async()
            .await;
        let client = client(&server.url());
        let cache = SchemaCache::new();

        assert!(cache.get_or_fetch(&client).await.is_err());
        assert!(cache.get().is_none());

        failing.remove_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_body(test_fixtures::introspection_response().to_string())
            .create_async()
            .await;

        assert!(cache.get_or_fetch(&client).await.is_ok());
        assert!(cache.get().is_some());
    }

    #[tokio::test]
    async fn response_without_schema_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_body(r#"{"data":{"__schema":null}}"#)
            .create_async()
            .await;

        let error = fetch_schema(&client(&server.url())).await.unwrap_err();
        assert!(matches!(error, GraphQLError::MissingSchema));
    }
}
