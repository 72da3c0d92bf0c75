use std::time::Duration;

use hasura_mcp_server::{errors::ServerError, mutation::MutationMode, server::Transport};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use schemars::JsonSchema;
use secrecy::{ExposeSecret as _, SecretString};
use serde::Deserialize;
use url::Url;

use super::{endpoint::Endpoint, logging::Logging};

/// Header carrying the admin secret on every GraphQL request
pub const ADMIN_SECRET_HEADER: &str = "x-hasura-admin-secret";

/// Configuration for the MCP server
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// The target GraphQL endpoint
    #[schemars(schema_with = "Url::json_schema")]
    pub endpoint: Endpoint,

    /// List of hard-coded headers to include in all GraphQL requests
    #[serde(deserialize_with = "parsers::map_from_str")]
    #[schemars(schema_with = "super::schemas::header_map")]
    pub headers: HeaderMap,

    /// Admin secret sent as the `x-hasura-admin-secret` header
    #[schemars(with = "Option<String>")]
    pub admin_secret: Option<SecretString>,

    /// Timeout for requests to the GraphQL endpoint (default: 30s)
    #[serde(with = "humantime_serde")]
    #[schemars(with = "String")]
    pub timeout: Duration,

    /// Logging configuration
    pub logging: Logging,

    /// Whether mutations may be run
    pub mutation_mode: MutationMode,

    /// The type of server transport to use
    pub transport: Transport,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::default(),
            headers: HeaderMap::new(),
            admin_secret: None,
            timeout: hasura_mcp_server::graphql::DEFAULT_TIMEOUT,
            logging: Logging::default(),
            mutation_mode: MutationMode::default(),
            transport: Transport::default(),
        }
    }
}

impl Config {
    /// The headers to forward with every request, including the admin secret
    pub fn header_map(&self) -> Result<HeaderMap, ServerError> {
        let mut headers = self.headers.clone();
        if let Some(secret) = &self.admin_secret {
            let mut value = HeaderValue::from_str(secret.expose_secret())?;
            value.set_sensitive(true);
            headers.insert(HeaderName::from_static(ADMIN_SECRET_HEADER), value);
        }
        Ok(headers)
    }
}

mod parsers {
    use std::str::FromStr;

    use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
    use serde::Deserializer;

    pub(super) fn map_from_str<'de, D>(deserializer: D) -> Result<HeaderMap, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MapFromStrVisitor;
        impl<'de> serde::de::Visitor<'de> for MapFromStrVisitor {
            type Value = HeaderMap;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a map of header string keys and values")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut parsed = HeaderMap::with_capacity(map.size_hint().unwrap_or(0));

                while let Some((key, value)) = map.next_entry::<String, String>()? {
                    let key = HeaderName::from_str(&key)
                        .map_err(|e| serde::de::Error::custom(e.to_string()))?;
                    let value = HeaderValue::from_str(&value)
                        .map_err(|e| serde::de::Error::custom(e.to_string()))?;

                    parsed.insert(key, value);
                }

                Ok(parsed)
            }
        }

        deserializer.deserialize_map(MapFromStrVisitor)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_parses_a_minimal_config() {
        let config = serde_json::from_str::<Config>("{}").unwrap();

        assert_eq!(config.endpoint.as_str(), "http://127.0.0.1:8080/v1/graphql");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.mutation_mode, MutationMode::None);
        assert_eq!(config.transport, Transport::Stdio);
        assert!(config.header_map().unwrap().is_empty());
    }

    #[test]
    fn it_parses_headers_and_secret() {
        let config = serde_json::from_value::<Config>(serde_json::json!({
            "headers": { "x-hasura-role": "analyst" },
            "admin_secret": "hunter2",
            "timeout": "1m 30s",
        }))
        .unwrap();

        let headers = config.header_map().unwrap();
        assert_eq!(headers.get("x-hasura-role").unwrap(), "analyst");
        assert_eq!(headers.get(ADMIN_SECRET_HEADER).unwrap(), "hunter2");
        assert!(headers.get(ADMIN_SECRET_HEADER).unwrap().is_sensitive());
        assert_eq!(config.timeout, Duration::from_secs(90));
    }

    #[test]
    fn it_rejects_invalid_header_names() {
        let result = serde_json::from_value::<Config>(serde_json::json!({
            "headers": { "bad header": "value" },
        }));

        assert!(result.is_err());
    }

    #[test]
    fn it_does_not_leak_the_secret_in_debug_output() {
        let config = serde_json::from_value::<Config>(serde_json::json!({
            "admin_secret": "hunter2",
        }))
        .unwrap();

        assert!(!format!("{config:?}").contains("hunter2"));
    }

    #[test]
    fn it_contains_no_keys_with_double_underscore() {
        // The env provider splits on `__` to reach nested fields, so no field
        // name may contain it. See [runtime::read_config]
        let schema = schemars::schema_for!(Config).to_value().to_string();

        assert!(!schema.contains("__"))
    }
}
