//! HTTP transport types for resource API communication.
//!
//! This module provides the transport layer that resource operations are
//! built on. It handles request validation, header merging, JSON body
//! decoding, and non-2xx error mapping.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`Transport`]: The seam every resource operation sends requests through
//! - [`HttpClient`]: The blocking `reqwest`-backed [`Transport`]
//! - [`MockTransport`]: A [`Transport`] serving canned responses, for tests
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PATCH, DELETE)
//! - [`DataType`]: Content types for request bodies
//!
//! # Example
//!
//! ```rust,no_run
//! use pragma_client::clients::{HttpClient, HttpMethod, HttpRequest, Transport};
//!
//! let client = HttpClient::builder().build().unwrap();
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "http://localhost:5000/api/v1/articles/1")
//!     .build()
//!     .unwrap();
//!
//! let response = client.execute(request).unwrap();
//! println!("{}", response.body["title"]);
//! ```
//!
//! # Retry Behavior
//!
//! No request is ever retried. Callers needing retries or timeouts configure
//! them on the transport (see [`HttpClientBuilder::timeout`]) or wrap it in
//! their own [`Transport`] implementation.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod mock;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, HttpClientBuilder, Transport, SDK_VERSION};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use mock::{MockTransport, UNEXPECTED_REQUEST_STATUS};
