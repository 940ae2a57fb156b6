//! GraphQL transport: one POST per operation, bearer-token authenticated.
//!
//! [`GraphQlTransport`] is the seam the board adapter is written against.
//! [`HttpGraphQlClient`] is the production implementation on top of `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

/// Public GitHub GraphQL endpoint.
pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// One entry of a GraphQL `errors` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    /// GitHub's error classification, e.g. `"NOT_FOUND"` or `"FORBIDDEN"`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl GraphQlError {
    /// Returns `true` if GitHub classified this error as `NOT_FOUND`.
    pub fn is_not_found(&self) -> bool {
        self.kind.as_deref() == Some("NOT_FOUND")
    }
}

/// Failures while executing a single GraphQL operation.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never produced an HTTP response (DNS, TLS, timeout, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not a GraphQL response document.
    #[error("Response is not a valid GraphQL document: {0}")]
    Decode(String),

    /// The response carried a non-empty `errors` array.
    #[error("GraphQL errors: {}", join_messages(.0))]
    GraphQl(Vec<GraphQlError>),

    /// The response had neither errors nor `data`.
    #[error("GraphQL response contained no data")]
    MissingData,
}

fn join_messages(errors: &[GraphQlError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

// ---------------------------------------------------------------------------
// Port
// ---------------------------------------------------------------------------

/// Executes one GraphQL operation and returns its `data` member.
#[async_trait]
pub trait GraphQlTransport: Send + Sync {
    async fn execute(&self, query: &str, variables: Value) -> Result<Value, TransportError>;
}

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

/// Connection settings for [`HttpGraphQlClient`].
#[derive(Clone)]
pub struct TransportConfig {
    /// GraphQL endpoint URL.
    pub api_url: String,
    /// Bearer token sent in the `Authorization` header.
    pub token: String,
    /// Overall request timeout. `None` keeps the `reqwest` default.
    pub timeout: Option<Duration>,
}

impl TransportConfig {
    /// Settings for the public GitHub API with no explicit timeout.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_GRAPHQL_URL.to_string(),
            token: token.into(),
            timeout: None,
        }
    }
}

// The token is deliberately left out.
impl std::fmt::Debug for TransportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportConfig")
            .field("api_url", &self.api_url)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Deserialize)]
struct ResponseEnvelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

/// `reqwest`-backed GraphQL client.
#[derive(Debug, Clone)]
pub struct HttpGraphQlClient {
    http: reqwest::Client,
    config: TransportConfig,
}

impl HttpGraphQlClient {
    /// Builds the underlying HTTP client.
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("days-estimate/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl GraphQlTransport for HttpGraphQlClient {
    async fn execute(&self, query: &str, variables: Value) -> Result<Value, TransportError> {
        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(&self.config.token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "GraphQL response received");

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: ResponseEnvelope =
            serde_json::from_str(&body).map_err(|e| TransportError::Decode(e.to_string()))?;
        if !envelope.errors.is_empty() {
            return Err(TransportError::GraphQl(envelope.errors));
        }
        match envelope.data {
            Some(data) if !data.is_null() => Ok(data),
            _ => Err(TransportError::MissingData),
        }
    }
}
