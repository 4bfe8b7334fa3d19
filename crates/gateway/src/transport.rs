//! Request transport
//!
//! Every operation is a single POST of `{query, variables}` to one
//! endpoint. The response is `{data, errors?}`; only `data` is returned
//! to callers and a non-empty `errors` list becomes `CrudError::Remote`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallcrud_core::{CrudError, CrudResult};
use tracing::debug;

/// Body of one request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphqlRequest {
    pub query: String,
    pub variables: Value,
}

impl GraphqlRequest {
    /// Create a new request
    pub fn new(query: impl Into<String>, variables: Value) -> Self {
        Self {
            query: query.into(),
            variables,
        }
    }
}

/// Body of one response
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

/// One entry of the `errors` list
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

impl GraphqlResponse {
    /// Unwrap `data`, failing when the backend reported errors
    pub fn into_data(self) -> CrudResult<Value> {
        if !self.errors.is_empty() {
            return Err(CrudError::Remote(
                self.errors.into_iter().map(|e| e.message).collect(),
            ));
        }
        Ok(self.data)
    }
}

/// Sends requests to the backend
#[async_trait]
pub trait Transport: Send + Sync {
    /// Post one request and return its `data` member
    async fn post(&self, request: &GraphqlRequest) -> CrudResult<Value>;
}

// ============================================================================
// HTTP Transport
// ============================================================================

/// Transport over HTTP using `reqwest`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
}

impl HttpTransport {
    /// Create a transport posting to `url`
    pub fn new(url: impl Into<String>) -> CrudResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| CrudError::transport(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Create a transport reusing an existing client
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, request: &GraphqlRequest) -> CrudResult<Value> {
        debug!(url = %self.url, query = %request.query, "Posting request");

        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| CrudError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CrudError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body: GraphqlResponse = response
            .json()
            .await
            .map_err(|e| CrudError::malformed("response", e.to_string()))?;

        body.into_data()
    }
}

// ============================================================================
// Recording Transport
// ============================================================================

#[cfg(any(test, feature = "testing"))]
pub use recording::RecordingTransport;

#[cfg(any(test, feature = "testing"))]
mod recording {
    use super::*;
    use std::sync::Mutex;

    type Responder = Box<dyn Fn(&GraphqlRequest) -> CrudResult<Value> + Send + Sync>;

    /// In-memory transport that records every request and answers
    /// through a responder closure
    pub struct RecordingTransport {
        requests: Mutex<Vec<GraphqlRequest>>,
        responder: Responder,
    }

    impl RecordingTransport {
        /// Answer every request through `responder`
        pub fn new(
            responder: impl Fn(&GraphqlRequest) -> CrudResult<Value> + Send + Sync + 'static,
        ) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                responder: Box::new(responder),
            }
        }

        /// Answer every request with the same `data`
        pub fn replying(data: Value) -> Self {
            Self::new(move |_| Ok(data.clone()))
        }

        /// Requests received so far
        pub fn requests(&self) -> Vec<GraphqlRequest> {
            self.requests
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .clone()
        }

        /// Number of requests received so far
        pub fn call_count(&self) -> usize {
            self.requests
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .len()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn post(&self, request: &GraphqlRequest) -> CrudResult<Value> {
            self.requests
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(request.clone());
            (self.responder)(request)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_with_errors_is_remote() {
        let response: GraphqlResponse = serde_json::from_value(json!({
            "data": null,
            "errors": [{"message": "boom"}]
        }))
        .unwrap();
        let err = response.into_data().unwrap_err();
        assert!(err.is_remote());
        assert_eq!(err.to_string(), "Backend reported errors: boom");
    }

    #[test]
    fn test_response_without_errors_returns_data() {
        let response: GraphqlResponse =
            serde_json::from_value(json!({"data": {"friend_delete": true}})).unwrap();
        assert_eq!(
            response.into_data().unwrap(),
            json!({"friend_delete": true})
        );
    }

    #[test]
    fn test_request_serializes_to_wire_body() {
        let request = GraphqlRequest::new("query { x }", json!({"a": 1}));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"query": "query { x }", "variables": {"a": 1}})
        );
    }

    #[tokio::test]
    async fn test_recording_transport_keeps_requests() {
        let transport = RecordingTransport::replying(json!({"ok": true}));
        let data = transport
            .post(&GraphqlRequest::new("q", Value::Null))
            .await
            .unwrap();
        assert_eq!(data, json!({"ok": true}));
        assert_eq!(transport.call_count(), 1);
        assert_eq!(transport.requests()[0].query, "q");
    }

    #[tokio::test]
    async fn test_http_transport_unreachable_endpoint() {
        // Port 9 (discard) on localhost is not expected to serve HTTP
        let transport = HttpTransport::new("http://127.0.0.1:9/graphql").unwrap();
        let err = transport
            .post(&GraphqlRequest::new("q", Value::Null))
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }
}
