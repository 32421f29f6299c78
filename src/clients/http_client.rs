//! Blocking HTTP client for resource API communication.
//!
//! This module provides the [`Transport`] seam used by every resource
//! operation and [`HttpClient`], its `reqwest`-backed implementation.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Executes one HTTP request synchronously.
///
/// Implementations must return `Err(HttpError::Response)` for non-2xx
/// statuses so that resource operations can map them to domain errors.
/// [`HttpClient`] is the production implementation;
/// [`MockTransport`](crate::clients::MockTransport) serves canned responses
/// in tests.
pub trait Transport: Send + Sync + fmt::Debug {
    /// Sends the request and blocks until a response is received.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on validation failure, network failure,
    /// non-2xx status, or an undecodable success body.
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).execute(request)
    }
}

/// Blocking HTTP client for resource APIs.
///
/// The client handles:
/// - Default headers including User-Agent and Accept
/// - Caller-provided default headers (e.g., authorization)
/// - Header merging and content-type from the body type
/// - JSON body decoding and non-2xx error mapping
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across threads.
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use pragma_client::clients::{HttpClient, HttpMethod, HttpRequest, Transport};
///
/// let client = HttpClient::builder()
///     .user_agent_prefix("BlogApp/1.0")
///     .timeout(Duration::from_secs(10))
///     .default_header("Authorization", "Bearer token")
///     .build()
///     .unwrap();
///
/// let request = HttpRequest::builder(HttpMethod::Get, "http://localhost:5000/api/v1/articles")
///     .query_param("page", "1")
///     .build()
///     .unwrap();
///
/// let response = client.execute(request).unwrap();
/// println!("{}", response.body);
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::blocking::Client,
    /// Default headers to include in all requests, keyed by lowercase name.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new builder for constructing an `HttpClient`.
    #[must_use]
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Decodes a response body; empty bodies become `null`.
    fn parse_body(code: u16, text: &str) -> Result<serde_json::Value, HttpError> {
        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        match serde_json::from_str(text) {
            Ok(body) => Ok(body),
            Err(_) if !(200..=299).contains(&code) => {
                Ok(serde_json::Value::String(text.to_string()))
            }
            Err(source) => Err(HttpError::InvalidJson { code, source }),
        }
    }

    /// Serializes the error fields of a response to compact JSON.
    fn serialize_error(response: &HttpResponse) -> String {
        let mut error_body = serde_json::Map::new();

        if let Some(errors) = response.body.get("errors") {
            error_body.insert("errors".to_string(), errors.clone());
        }
        if let Some(error) = response.body.get("error") {
            error_body.insert("error".to_string(), error.clone());
            if let Some(desc) = response.body.get("error_description") {
                error_body.insert("error_description".to_string(), desc.clone());
            }
        }
        if let serde_json::Value::String(raw) = &response.body {
            error_body.insert("error".to_string(), serde_json::json!(raw));
        }

        if let Some(request_id) = response.request_id() {
            error_body.insert(
                "error_reference".to_string(),
                serde_json::json!(format!(
                    "If you report this error, please include this id: {request_id}."
                )),
            );
        }

        serde_json::to_string(&error_body).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Transport for HttpClient {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let mut headers = self.default_headers.clone();
        if let Some(body_type) = &request.body_type {
            headers.insert(
                "content-type".to_string(),
                body_type.as_content_type().to_string(),
            );
        }
        for (key, value) in &request.headers {
            headers.insert(key.to_ascii_lowercase(), value.clone());
        }

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Patch => self.client.patch(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };

        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        tracing::debug!(method = %request.http_method, url = %request.url, "Sending request");

        let res = req_builder.send()?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text()?;
        let body = Self::parse_body(code, &body_text)?;

        let response = HttpResponse::new(code, res_headers, body);

        if response.is_ok() {
            return Ok(response);
        }

        tracing::debug!(
            method = %request.http_method,
            url = %request.url,
            status = code,
            "Received non-2xx response"
        );

        Err(HttpError::Response(HttpResponseError {
            code,
            message: Self::serialize_error(&response),
            error_reference: response.request_id().map(String::from),
            body: response.body,
        }))
    }
}

/// Builder for constructing [`HttpClient`] instances.
///
/// # Defaults
///
/// - `user-agent`: `pragma-client v{version} | Rust {rust_version}`
/// - `accept`: `application/json`
/// - no timeout
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
    default_headers: HashMap<String, String>,
}

impl HttpClientBuilder {
    /// Sets a prefix for the User-Agent header (e.g., `BlogApp/1.0`).
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets a total timeout applied to every request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adds a header sent with every request.
    ///
    /// Request headers with the same name take precedence.
    #[must_use]
    pub fn default_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers
            .insert(key.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Builds the [`HttpClient`].
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client
    /// cannot be created (e.g., TLS initialization failure).
    pub fn build(self) -> Result<HttpClient, HttpError> {
        let user_agent_prefix = self
            .user_agent_prefix
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}pragma-client v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("user-agent".to_string(), user_agent);
        default_headers.insert("accept".to_string(), "application/json".to_string());
        default_headers.extend(self.default_headers);

        let mut builder = reqwest::blocking::Client::builder().use_rustls_tls();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(HttpClient {
            client,
            default_headers,
        })
    }
}
