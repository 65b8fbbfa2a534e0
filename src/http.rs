//! HTTP client abstraction for talking to the solicitudes API.
//!
//! This module defines the `HttpClient` trait to abstract HTTP request
//! execution, enabling testability with mock implementations.

use crate::error::{Result, SubmissionError};
use async_trait::async_trait;
use std::time::Duration;

/// Response from an HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as a string
    pub body: String,
}

impl HttpResponse {
    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A text field of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartField {
    pub name: String,
    pub value: String,
}

/// A file part of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartFile {
    pub name: String,
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// An inspectable multipart/form-data body.
///
/// Kept as plain data (rather than `reqwest::multipart::Form` directly) so
/// that mock clients can record and assert on the individual parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartBody {
    pub fields: Vec<MultipartField>,
    pub files: Vec<MultipartFile>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(MultipartField {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Append a named file part.
    pub fn file(
        mut self,
        name: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.files.push(MultipartFile {
            name: name.into(),
            filename: filename.into(),
            content_type: content_type.into(),
            bytes,
        });
        self
    }

    /// Look up a text field by name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

/// Trait for executing HTTP requests against the backend.
///
/// This abstraction allows for different implementations (production vs.
/// testing) and makes the submission workflow testable without making real
/// HTTP calls. All methods take the endpoint (base URL) and path separately;
/// the timeout applies to the individual request attempt.
#[async_trait]
pub trait HttpClient: Send + Sync + Clone {
    /// Execute a GET request.
    async fn get(&self, endpoint: &str, path: &str, timeout_ms: u64) -> Result<HttpResponse>;

    /// Execute a POST request with a JSON body.
    async fn post_json(
        &self,
        endpoint: &str,
        path: &str,
        body: String,
        timeout_ms: u64,
    ) -> Result<HttpResponse>;

    /// Execute a POST request with a multipart/form-data body.
    async fn post_multipart(
        &self,
        endpoint: &str,
        path: &str,
        body: MultipartBody,
        timeout_ms: u64,
    ) -> Result<HttpResponse>;

    /// Execute a PUT request with a JSON body.
    async fn put_json(
        &self,
        endpoint: &str,
        path: &str,
        body: String,
        timeout_ms: u64,
    ) -> Result<HttpResponse>;
}

// ============================================================================
// Production Implementation using reqwest
// ============================================================================

/// Production HTTP client using reqwest.
///
/// This implementation makes real HTTP requests to the backend.
#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Create a new reqwest-based HTTP client.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    async fn read_response(response: reqwest::Response) -> Result<HttpResponse> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    #[tracing::instrument(skip(self))]
    async fn get(&self, endpoint: &str, path: &str, timeout_ms: u64) -> Result<HttpResponse> {
        let url = format!("{}{}", endpoint, path);
        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_millis(timeout_ms))
            .send()
            .await?;
        Self::read_response(response).await
    }

    #[tracing::instrument(skip(self, body), fields(body_len = body.len()))]
    async fn post_json(
        &self,
        endpoint: &str,
        path: &str,
        body: String,
        timeout_ms: u64,
    ) -> Result<HttpResponse> {
        let url = format!("{}{}", endpoint, path);
        tracing::debug!(url = %url, timeout_ms = timeout_ms, "Executing JSON POST");

        let response = self
            .client
            .post(&url)
            .timeout(Duration::from_millis(timeout_ms))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(url = %url, error = %e, "HTTP request failed");
                e
            })?;

        let response = Self::read_response(response).await?;
        tracing::info!(
            status = response.status,
            response_len = response.body.len(),
            "JSON POST completed"
        );
        Ok(response)
    }

    #[tracing::instrument(skip(self, body), fields(parts = body.fields.len() + body.files.len()))]
    async fn post_multipart(
        &self,
        endpoint: &str,
        path: &str,
        body: MultipartBody,
        timeout_ms: u64,
    ) -> Result<HttpResponse> {
        let url = format!("{}{}", endpoint, path);
        tracing::debug!(url = %url, timeout_ms = timeout_ms, "Executing multipart POST");

        let mut form = reqwest::multipart::Form::new();
        for field in body.fields {
            form = form.text(field.name, field.value);
        }
        for file in body.files {
            let part = reqwest::multipart::Part::bytes(file.bytes)
                .file_name(file.filename)
                .mime_str(&file.content_type)
                .map_err(|e| {
                    SubmissionError::Other(anyhow::anyhow!(
                        "invalid content type '{}': {}",
                        file.content_type,
                        e
                    ))
                })?;
            form = form.part(file.name, part);
        }

        let response = self
            .client
            .post(&url)
            .timeout(Duration::from_millis(timeout_ms))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(url = %url, error = %e, "HTTP request failed");
                e
            })?;

        let response = Self::read_response(response).await?;
        tracing::info!(status = response.status, "Multipart POST completed");
        Ok(response)
    }

    #[tracing::instrument(skip(self, body), fields(body_len = body.len()))]
    async fn put_json(
        &self,
        endpoint: &str,
        path: &str,
        body: String,
        timeout_ms: u64,
    ) -> Result<HttpResponse> {
        let url = format!("{}{}", endpoint, path);
        let response = self
            .client
            .put(&url)
            .timeout(Duration::from_millis(timeout_ms))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?;
        Self::read_response(response).await
    }
}

// ============================================================================
// Test/Mock Implementation
// ============================================================================

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::oneshot;

/// Mock HTTP client for testing.
///
/// Allows configuring predetermined responses for specific requests without
/// making actual HTTP calls. Responses are keyed on `"{METHOD} {path}"` and
/// served in FIFO order; every call is recorded (including multipart parts)
/// so tests can assert on call order and request contents.
///
/// # Example
/// ```ignore
/// let mock = MockHttpClient::new();
/// mock.add_response(
///     "POST /api/solicitudes",
///     Ok(HttpResponse { status: 200, body: r#"{"id":"42"}"#.to_string() }),
/// );
/// ```
#[derive(Clone, Default)]
pub struct MockHttpClient {
    responses: Arc<Mutex<HashMap<String, Vec<MockResponse>>>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

/// A mock response that can optionally wait for a trigger before completing.
enum MockResponse {
    /// Immediate response
    Immediate(Result<HttpResponse>),
    /// Response that waits for a trigger signal before completing
    Triggered {
        response: Result<HttpResponse>,
        trigger: Arc<Mutex<Option<oneshot::Receiver<()>>>>,
    },
}

/// Record of a call made to the mock HTTP client.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub method: String,
    pub endpoint: String,
    pub path: String,
    /// JSON body for `post_json`/`put_json`, empty otherwise.
    pub body: String,
    /// The multipart body for `post_multipart` calls.
    pub multipart: Option<MultipartBody>,
    pub timeout_ms: u64,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predetermined response for a specific method and path.
    ///
    /// The key is formatted as "{METHOD} {path}". Multiple responses can be
    /// added for the same key - they will be returned in FIFO order.
    pub fn add_response(&self, key: &str, response: Result<HttpResponse>) {
        self.responses
            .lock()
            .entry(key.to_string())
            .or_default()
            .push(MockResponse::Immediate(response));
    }

    /// Add a response that will wait for a manual trigger before completing.
    ///
    /// Returns a sender that when triggered (by sending `()` or dropping)
    /// will cause the HTTP request to complete with the given response.
    pub fn add_response_with_trigger(
        &self,
        key: &str,
        response: Result<HttpResponse>,
    ) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.responses
            .lock()
            .entry(key.to_string())
            .or_default()
            .push(MockResponse::Triggered {
                response,
                trigger: Arc::new(Mutex::new(Some(rx))),
            });
        tx
    }

    /// Get all calls that have been made to this mock client, in order.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.calls.lock().clone()
    }

    /// Clear all recorded calls.
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Get the number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    async fn dispatch(
        &self,
        method: &str,
        endpoint: &str,
        path: &str,
        body: String,
        multipart: Option<MultipartBody>,
        timeout_ms: u64,
    ) -> Result<HttpResponse> {
        self.calls.lock().push(MockCall {
            method: method.to_string(),
            endpoint: endpoint.to_string(),
            path: path.to_string(),
            body,
            multipart,
            timeout_ms,
        });

        let key = format!("{} {}", method, path);
        let mock_response = {
            let mut responses = self.responses.lock();
            match responses.get_mut(&key) {
                Some(queue) if !queue.is_empty() => Some(queue.remove(0)),
                _ => None,
            }
        };

        match mock_response {
            Some(MockResponse::Immediate(response)) => response,
            Some(MockResponse::Triggered { response, trigger }) => {
                let rx = trigger.lock().take();
                if let Some(rx) = rx {
                    // Wait for trigger (ignore the result - we proceed either way)
                    let _ = rx.await;
                }
                response
            }
            None => Err(SubmissionError::Other(anyhow::anyhow!(
                "No mock response configured for {} {}",
                method,
                path
            ))),
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, endpoint: &str, path: &str, timeout_ms: u64) -> Result<HttpResponse> {
        self.dispatch("GET", endpoint, path, String::new(), None, timeout_ms)
            .await
    }

    async fn post_json(
        &self,
        endpoint: &str,
        path: &str,
        body: String,
        timeout_ms: u64,
    ) -> Result<HttpResponse> {
        self.dispatch("POST", endpoint, path, body, None, timeout_ms)
            .await
    }

    async fn post_multipart(
        &self,
        endpoint: &str,
        path: &str,
        body: MultipartBody,
        timeout_ms: u64,
    ) -> Result<HttpResponse> {
        self.dispatch("POST", endpoint, path, String::new(), Some(body), timeout_ms)
            .await
    }

    async fn put_json(
        &self,
        endpoint: &str,
        path: &str,
        body: String,
        timeout_ms: u64,
    ) -> Result<HttpResponse> {
        self.dispatch("PUT", endpoint, path, body, None, timeout_ms)
            .await
    }
}
