use reqwest::StatusCode;
use reqwest::header::InvalidHeaderValue;
use tokio::task::JoinError;

/// An error talking to the GraphQL endpoint
#[derive(Debug, thiserror::Error)]
pub enum GraphQLError {
    #[error("Failed to send GraphQL request: {0}")]
    Request(#[source] reqwest::Error),

    #[error("GraphQL endpoint responded with {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to read GraphQL response body: {0}")]
    Body(#[source] reqwest::Error),

    #[error("GraphQL request failed: {0}")]
    Response(String),

    #[error("Introspection response did not contain a schema")]
    MissingSchema,

    #[error("Invalid introspection schema: {0}")]
    InvalidSchema(#[source] serde_json::Error),
}

/// A failure while running a tool
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// The endpoint was unreachable or answered with errors
    #[error(transparent)]
    GraphQL(#[from] GraphQLError),

    /// A table, type or root field does not exist
    #[error("{0}")]
    NotFound(String),

    /// The tool input was rejected before contacting the endpoint
    #[error("{0}")]
    Invalid(String),

    /// The tool output could not be rendered as JSON
    #[error("Failed to serialize tool output: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// An error in server initialization
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid header value: {0}")]
    HeaderValue(#[from] InvalidHeaderValue),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Failed to initialize MCP server: {0}")]
    McpInitializeError(#[from] Box<rmcp::service::ServerInitializeError<std::io::Error>>),

    #[error("Failed to start server")]
    StartupError(#[from] JoinError),
}

/// An MCP tool error
pub type McpError = rmcp::model::ErrorData;
