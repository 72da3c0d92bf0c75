use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use bon::bon;
use reqwest::header::HeaderMap;
use rmcp::ServiceExt as _;
use rmcp::transport::stdio;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::StreamableHttpService;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{error, info};
use url::Url;

use crate::errors::ServerError;
use crate::graphql::{DEFAULT_TIMEOUT, GraphQLClient};
use crate::mutation::MutationMode;
use crate::server_handler::HasuraMcpServerHandler;

/// Path the streamable HTTP transport is served under
const MCP_PATH: &str = "/mcp";

/// A Hasura MCP Server
pub struct Server {
    transport: Transport,
    client: GraphQLClient,
    mutation_mode: MutationMode,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transport {
    /// Use standard IO for server <> client communication
    #[default]
    Stdio,

    /// Host the MCP server on the supplied address, using streamable HTTP messages
    StreamableHttp {
        /// The IP address to bind to
        #[serde(default = "Transport::default_address")]
        address: IpAddr,

        /// The port to bind to
        #[serde(default = "Transport::default_port")]
        port: u16,
    },
}

impl Transport {
    fn default_address() -> IpAddr {
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    }

    fn default_port() -> u16 {
        5000
    }
}

#[bon]
impl Server {
    #[builder]
    pub fn new(
        #[builder(default)] transport: Transport,
        endpoint: Url,
        #[builder(default)] headers: HeaderMap,
        #[builder(default = DEFAULT_TIMEOUT)] timeout: Duration,
        #[builder(default)] mutation_mode: MutationMode,
    ) -> Result<Self, ServerError> {
        let client = GraphQLClient::builder()
            .endpoint(endpoint)
            .headers(headers)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            transport,
            client,
            mutation_mode,
        })
    }

    pub async fn start(self) -> Result<(), ServerError> {
        info!(
            endpoint = %self.client.endpoint(),
            mutation_mode = ?self.mutation_mode,
            "Starting Hasura MCP Server"
        );
        let handler = HasuraMcpServerHandler::new(self.client, self.mutation_mode);

        match self.transport {
            Transport::StreamableHttp { address, port } => {
                info!(port = ?port, address = ?address, "Starting MCP server in Streamable HTTP mode");
                let listen_address = SocketAddr::new(address, port);
                let service = StreamableHttpService::new(
                    move || Ok(handler.clone()),
                    LocalSessionManager::default().into(),
                    Default::default(),
                );
                let router = axum::Router::new().nest_service(MCP_PATH, service);
                let tcp_listener = tokio::net::TcpListener::bind(listen_address).await?;
                axum::serve(tcp_listener, router)
                    .with_graceful_shutdown(shutdown_signal())
                    .await?;
            }
            Transport::Stdio => {
                info!("Starting MCP server in stdio mode");
                let service = handler
                    .serve(stdio())
                    .await
                    .inspect_err(|e| {
                        error!("serving error: {:?}", e);
                    })
                    .map_err(Box::new)?;
                service.waiting().await.map_err(ServerError::StartupError)?;
            }
        }

        Ok(())
    }
}

#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutting down");
}
