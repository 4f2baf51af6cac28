//! Transport boundary for all GraphQL I/O.
//!
//! The pipeline never talks to GitHub directly; it goes through the
//! [`GithubTransport`] capability so tests can substitute deterministic,
//! queued responses without global mutable state.

use std::time::Duration;

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use octocrab::Octocrab;
use serde_json::Value;
use thiserror::Error;

/// Errors raised at the transport boundary.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failed to construct the underlying client.
    #[error("failed to build GitHub client: {0}")]
    Client(String),

    /// The query could not be executed.
    #[error("query failed: {0}")]
    Query(String),

    /// The API answered with GraphQL-level errors.
    #[error("GraphQL error: {0}")]
    Graphql(String),

    /// The response carried no `data` payload.
    #[error("response missing data payload")]
    MissingData,

    /// No mock response registered for a query (test transports only).
    #[error("no mock response registered for variables {variables}")]
    NoMockResponse { variables: String },
}

/// Capability object for executing parameterized GraphQL queries.
///
/// Implementations resolve the response envelope and return the `data`
/// payload only; GraphQL-level errors surface as [`TransportError::Graphql`].
#[async_trait]
pub trait GithubTransport: Send + Sync {
    async fn query(&self, query: &str, variables: Value) -> Result<Value, TransportError>;
}

/// Real transport backed by octocrab's GraphQL endpoint.
///
/// Transient rate-limit failures are retried with exponential backoff before
/// one error surfaces; the pipeline above this boundary never retries.
pub struct OctocrabTransport {
    client: Octocrab,
}

impl OctocrabTransport {
    /// Build an authenticated transport from a personal access token.
    pub fn new(token: impl Into<String>) -> Result<Self, TransportError> {
        let client = Octocrab::builder()
            .personal_token(token.into())
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an already-configured octocrab client.
    pub fn from_client(client: Octocrab) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GithubTransport for OctocrabTransport {
    async fn query(&self, query: &str, variables: Value) -> Result<Value, TransportError> {
        let payload = serde_json::json!({ "query": query, "variables": variables });

        let send = || async { self.client.graphql::<Value>(&payload).await };
        let response = send
            .retry(default_backoff())
            .when(is_rate_limit_error)
            .notify(|err, dur| {
                tracing::debug!("rate limited, retrying in {:?}: {}", dur, err);
            })
            .await
            .map_err(|e| TransportError::Query(e.to_string()))?;

        resolve_envelope(response)
    }
}

/// Split a GraphQL response envelope into its `data` payload, surfacing
/// any `errors` entries first.
fn resolve_envelope(mut response: Value) -> Result<Value, TransportError> {
    if let Some(errors) = response.get("errors").and_then(Value::as_array)
        && !errors.is_empty()
    {
        let messages: Vec<String> = errors
            .iter()
            .map(|e| {
                e.get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown error")
                    .to_string()
            })
            .collect();
        return Err(TransportError::Graphql(messages.join("; ")));
    }

    match response.get_mut("data") {
        Some(data) if !data.is_null() => Ok(data.take()),
        _ => Err(TransportError::MissingData),
    }
}

/// Check if an error indicates a rate limit (403/429 or JSON parse error
/// from an empty response).
fn is_rate_limit_error(e: &octocrab::Error) -> bool {
    match e {
        octocrab::Error::GitHub { source, .. } => {
            let status = source.status_code.as_u16();
            status == 403 || status == 429
        }
        octocrab::Error::Json { .. } => true,
        _ => false,
    }
}

/// Exponential backoff used for transient transport failures: 1s initial,
/// 60s cap, 5 attempts, jittered.
fn default_backoff() -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_secs(1))
        .with_max_delay(Duration::from_secs(60))
        .with_max_times(5)
        .with_jitter()
}

pub mod testing {
    //! In-memory mock transport for tests.
    //!
    //! No sockets, no loopback HTTP servers. Responses are registered per
    //! variable set and returned FIFO, so concurrent callers are always
    //! answered deterministically.

    use std::collections::{HashMap, VecDeque};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use serde_json::Value;

    use super::{GithubTransport, TransportError};

    /// A query observed by the mock, in call order.
    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedQuery {
        pub query: String,
        pub variables: Value,
    }

    #[derive(Default)]
    struct MockTransportInner {
        routes: HashMap<String, VecDeque<Result<Value, String>>>,
        requests: Vec<RecordedQuery>,
    }

    /// In-memory mock transport.
    #[derive(Clone, Default)]
    pub struct MockTransport {
        inner: Arc<Mutex<MockTransportInner>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Register a `data` payload for a variable set.
        ///
        /// If multiple responses are registered for the same variables, they
        /// are returned in FIFO order.
        pub fn push_data(&self, variables: Value, data: Value) {
            self.push(variables, Ok(data));
        }

        /// Register a failure for a variable set.
        pub fn push_error(&self, variables: Value, message: impl Into<String>) {
            self.push(variables, Err(message.into()));
        }

        fn push(&self, variables: Value, response: Result<Value, String>) {
            let mut inner = self
                .inner
                .lock()
                .expect("mock transport lock should not be poisoned");
            inner
                .routes
                .entry(variables.to_string())
                .or_default()
                .push_back(response);
        }

        /// All queries seen so far, in call order.
        #[must_use]
        pub fn requests(&self) -> Vec<RecordedQuery> {
            let inner = self
                .inner
                .lock()
                .expect("mock transport lock should not be poisoned");
            inner.requests.clone()
        }
    }

    #[async_trait]
    impl GithubTransport for MockTransport {
        async fn query(&self, query: &str, variables: Value) -> Result<Value, TransportError> {
            let mut inner = self
                .inner
                .lock()
                .expect("mock transport lock should not be poisoned");

            let key = variables.to_string();
            inner.requests.push(RecordedQuery {
                query: query.to_string(),
                variables,
            });

            match inner.routes.get_mut(&key).and_then(|q| q.pop_front()) {
                Some(Ok(data)) => Ok(data),
                Some(Err(message)) => Err(TransportError::Query(message)),
                None => Err(TransportError::NoMockResponse { variables: key }),
            }
        }
    }
}
