//! Runtime utilites
//!
//! This module is only used by the main binary and provides helper code
//! related to runtime configuration.

mod config;
mod endpoint;
mod logging;
mod schemas;

use std::path::{Path, PathBuf};

pub use config::Config;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use logging::Logging;

/// Separator to use when drilling down into nested options in the env figment
const ENV_NESTED_SEPARATOR: &str = "__";

/// Prefix of the environment variables that map onto the config
const ENV_PREFIX: &str = "HASURA_MCP_";

/// Read configuration from environment variables only (when no config file is provided)
#[allow(clippy::result_large_err)]
pub fn read_config_from_env() -> Result<Config, figment::Error> {
    Figment::new()
        .join(Env::prefixed(ENV_PREFIX).split(ENV_NESTED_SEPARATOR))
        .join(hasura_common_env())
        .extract()
}

/// Read in a config from a YAML file, filling in any missing values from the environment
#[allow(clippy::result_large_err)]
pub fn read_config(yaml_path: impl AsRef<Path>) -> Result<Config, figment::Error> {
    Figment::new()
        .join(Env::prefixed(ENV_PREFIX).split(ENV_NESTED_SEPARATOR))
        .join(hasura_common_env())
        .join(Yaml::file(yaml_path))
        .extract()
}

/// Sets up either file logging or stderr logging depending on provided configuration options
pub fn setup_logging(config: &Config) -> Result<Option<WorkerGuard>, anyhow::Error> {
    let mut env_filter = EnvFilter::from_default_env().add_directive(config.logging.level.into());

    if config.logging.level == Level::INFO {
        env_filter = env_filter.add_directive("rmcp=warn".parse()?);
    }

    if let Some(path) = &config.logging.path {
        setup_file_logging(path, &config.logging, env_filter)
    } else {
        setup_stderr_logging(env_filter)
    }
}

/// Sets up rolling file appender logging but falls back to stderr logging on failure
fn setup_file_logging(
    log_path: &PathBuf,
    logging: &Logging,
    env_filter: EnvFilter,
) -> Result<Option<WorkerGuard>, anyhow::Error> {
    if let Err(err) = std::fs::create_dir_all(log_path) {
        eprintln!("Failed to build log path - falling back to stderr: {err}");
        return setup_stderr_logging(env_filter);
    }

    let (non_blocking_writer, guard) = match RollingFileAppender::builder()
        .rotation(logging.rotation.into())
        .filename_prefix("hasura_mcp_server")
        .filename_suffix("log")
        .build(log_path)
    {
        Ok(appender) => tracing_appender::non_blocking(appender),
        Err(err) => {
            eprintln!("Failed to build log file - falling back to stderr: {err}");
            return setup_stderr_logging(env_filter);
        }
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_writer)
                .with_ansi(false)
                .with_target(false),
        )
        .init();

    Ok(Some(guard))
}

/// Sets up stderr logging, keeping stdout free for the stdio transport
fn setup_stderr_logging(env_filter: EnvFilter) -> Result<Option<WorkerGuard>, anyhow::Error> {
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .with_target(false),
        )
        .init();

    Ok(None)
}

/// Figment provider that maps the environment variables commonly used to
/// configure Hasura clients into the config
fn hasura_common_env() -> Env {
    Env::prefixed("HASURA_")
        .only(&["graphql_endpoint", "admin_secret"])
        .map(|key| match key.to_string().to_lowercase().as_str() {
            "graphql_endpoint" => "endpoint".into(),
            "admin_secret" => "admin_secret".into(),

            // Filtered out by `only` above
            other => other.to_string().into(),
        })
}

#[cfg(test)]
mod test {
    use secrecy::ExposeSecret as _;

    use super::{read_config, read_config_from_env};
    use crate::runtime::config::ADMIN_SECRET_HEADER;

    #[test]
    fn it_prioritizes_env_vars() {
        let config = r#"
            endpoint: http://from_file:8080/v1/graphql
        "#;

        figment::Jail::expect_with(move |jail| {
            let path = "config.yaml";
            let endpoint = "https://from_env:8080/v1/graphql";

            jail.create_file(path, config)?;
            jail.set_env("HASURA_MCP_ENDPOINT", endpoint);

            let config = read_config(path)?;

            assert_eq!(config.endpoint.as_str(), endpoint);
            Ok(())
        });
    }

    #[test]
    fn it_extracts_nested_env() {
        let config = r#"
            transport:
                type: streamable_http
        "#;

        figment::Jail::expect_with(move |jail| {
            let path = "config.yaml";

            jail.create_file(path, config)?;
            jail.set_env("HASURA_MCP_TRANSPORT__PORT", "9000");
            jail.set_env("HASURA_MCP_LOGGING__LEVEL", "debug");

            let config = read_config(path)?;

            assert!(matches!(
                config.transport,
                hasura_mcp_server::server::Transport::StreamableHttp { port: 9000, .. }
            ));
            assert_eq!(config.logging.level, tracing::Level::DEBUG);
            Ok(())
        });
    }

    #[test]
    fn it_merges_env_and_file() {
        let config = "
            endpoint: http://from_file:8080/v1/graphql
            timeout: 5s
        ";

        figment::Jail::expect_with(move |jail| {
            let path = "config.yaml";

            jail.create_file(path, config)?;
            jail.set_env("HASURA_MCP_MUTATION_MODE", "all");

            let config = read_config(path)?;

            assert_eq!(config.endpoint.as_str(), "http://from_file:8080/v1/graphql");
            assert_eq!(config.timeout, std::time::Duration::from_secs(5));
            assert!(config.mutation_mode.allows_mutations());
            Ok(())
        });
    }

    #[test]
    fn it_reads_common_hasura_env() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("HASURA_GRAPHQL_ENDPOINT", "https://hasura.example.com/v1/graphql");
            jail.set_env("HASURA_ADMIN_SECRET", "s3cr3t");

            let config = read_config_from_env()?;

            assert_eq!(
                config.endpoint.as_str(),
                "https://hasura.example.com/v1/graphql"
            );
            assert_eq!(
                config
                    .admin_secret
                    .as_ref()
                    .map(|secret| secret.expose_secret()),
                Some("s3cr3t")
            );

            let headers = config.header_map().unwrap();
            assert_eq!(
                headers.get(ADMIN_SECRET_HEADER).unwrap().to_str().unwrap(),
                "s3cr3t"
            );
            Ok(())
        });
    }

    #[test]
    fn prefixed_env_wins_over_common_env() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("HASURA_GRAPHQL_ENDPOINT", "https://common:8080/v1/graphql");
            jail.set_env("HASURA_MCP_ENDPOINT", "https://prefixed:8080/v1/graphql");

            let config = read_config_from_env()?;

            assert_eq!(config.endpoint.as_str(), "https://prefixed:8080/v1/graphql");
            Ok(())
        });
    }
}
