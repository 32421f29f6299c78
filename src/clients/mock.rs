//! In-memory transport for testing resource code without a server.
//!
//! [`MockTransport`] replays queued responses in FIFO order and records every
//! request it receives, so tests can assert on exact request counts, URLs,
//! query parameters and bodies.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use pragma_client::clients::{HttpMethod, HttpRequest, MockTransport, Transport};
//! use serde_json::json;
//!
//! let mock = Arc::new(MockTransport::new());
//! mock.respond_json(200, json!({"id": 1, "title": "Hello"}));
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "http://localhost/articles/1")
//!     .build()
//!     .unwrap();
//! let response = mock.execute(request).unwrap();
//!
//! assert_eq!(response.body["title"], "Hello");
//! assert_eq!(mock.request_count(), 1);
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_client::Transport;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;

/// Status returned when a request arrives and no response is queued.
pub const UNEXPECTED_REQUEST_STATUS: u16 = 501;

#[derive(Debug, Default)]
struct MockState {
    responses: VecDeque<HttpResponse>,
    requests: Vec<HttpRequest>,
}

/// A [`Transport`] that serves canned responses.
///
/// Non-2xx responses are returned as [`HttpError::Response`], matching
/// [`HttpClient`](crate::clients::HttpClient). A request with nothing queued
/// fails with status 501 so that unexpected calls surface as errors.
#[derive(Debug, Default)]
pub struct MockTransport {
    state: Mutex<MockState>,
}

impl MockTransport {
    /// Creates a transport with no queued responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queues a response.
    pub fn respond(&self, response: HttpResponse) {
        self.state().responses.push_back(response);
    }

    /// Queues a response with a JSON body.
    pub fn respond_json(&self, code: u16, body: serde_json::Value) {
        self.respond(HttpResponse::new(code, HashMap::new(), body));
    }

    /// Queues a response with an empty body.
    pub fn respond_status(&self, code: u16) {
        self.respond(HttpResponse::new(
            code,
            HashMap::new(),
            serde_json::Value::Null,
        ));
    }

    /// Returns a copy of every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state().requests.clone()
    }

    /// Returns the most recent request, if any.
    #[must_use]
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.state().requests.last().cloned()
    }

    /// Returns the number of requests received so far.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.state().requests.len()
    }

    /// Returns the number of queued responses not yet consumed.
    #[must_use]
    pub fn pending_responses(&self) -> usize {
        self.state().responses.len()
    }
}

impl Transport for MockTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let mut state = self.state();
        state.requests.push(request);
        let response = state
            .responses
            .pop_front()
            .unwrap_or_else(|| {
                HttpResponse::new(
                    UNEXPECTED_REQUEST_STATUS,
                    HashMap::new(),
                    serde_json::json!({"error": "No response queued"}),
                )
            });
        drop(state);

        if response.is_ok() {
            return Ok(response);
        }

        Err(HttpError::Response(HttpResponseError {
            code: response.code,
            message: response.body.to_string(),
            error_reference: response.request_id().map(String::from),
            body: response.body,
        }))
    }
}

// Verify MockTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MockTransport>();
};
