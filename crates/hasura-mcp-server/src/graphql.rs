//! Execute GraphQL requests against the configured endpoint

use std::time::Duration;

use bon::bon;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::{Value, json};
use tracing::debug;
use url::Url;

use crate::errors::{GraphQLError, ServerError};

/// Timeout applied to every request unless configured otherwise
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A GraphQL client bound to a single endpoint.
///
/// The configured headers (admin secret, role headers, ...) are forwarded
/// with every request.
#[derive(Clone, Debug)]
pub struct GraphQLClient {
    http: reqwest::Client,
    endpoint: Url,
    headers: HeaderMap,
}

#[bon]
impl GraphQLClient {
    #[builder]
    pub fn new(
        endpoint: Url,
        #[builder(default)] headers: HeaderMap,
        #[builder(default = DEFAULT_TIMEOUT)] timeout: Duration,
    ) -> Result<Self, ServerError> {
        let headers = {
            let mut headers = headers;
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            headers
        };
        Ok(Self {
            http: reqwest::Client::builder().timeout(timeout).build()?,
            endpoint,
            headers,
        })
    }
}

impl GraphQLClient {
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Post a query and return the raw response.
    ///
    /// A response with errors and without data is turned into an error, while
    /// partial data is passed through untouched.
    pub async fn execute(&self, query: &str, variables: Option<Value>) -> Result<Value, GraphQLError> {
        let mut request_body = json!({ "query": query });
        if let (Some(variables), Some(obj)) = (variables, request_body.as_object_mut()) {
            obj.insert("variables".to_string(), variables);
        }
        debug!(endpoint = %self.endpoint, %query, "Sending GraphQL request");

        let response = self
            .http
            .post(self.endpoint.clone())
            .headers(self.headers.clone())
            .body(request_body.to_string())
            .send()
            .await
            .map_err(GraphQLError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(GraphQLError::Body)?;
            return Err(GraphQLError::Status { status, body });
        }

        let json = response.json::<Value>().await.map_err(GraphQLError::Body)?;
        match error_message(&json) {
            Some(message) => Err(GraphQLError::Response(message)),
            None => Ok(json),
        }
    }

    /// Fetch a plain URL, such as a health endpoint, returning status and body.
    ///
    /// The configured headers are only sent to the GraphQL endpoint, never to
    /// an arbitrary URL.
    pub async fn get_text(&self, url: &str) -> Result<(StatusCode, String), GraphQLError> {
        debug!(%url, "Sending GET request");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(GraphQLError::Request)?;
        let status = response.status();
        let body = response.text().await.map_err(GraphQLError::Body)?;
        Ok((status, body))
    }
}

/// Collect the error messages of a response that carries no data
fn error_message(response: &Value) -> Option<String> {
    let has_data = response
        .get("data")
        .is_some_and(|data| !matches!(data, Value::Null));
    if has_data {
        return None;
    }

    let errors = response.get("errors")?.as_array()?;
    if errors.is_empty() {
        return None;
    }
    Some(
        errors
            .iter()
            .map(|error| {
                error
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| error.to_string())
            })
            .collect::<Vec<_>>()
            .join("; "),
    )
}
