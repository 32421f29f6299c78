//! # pragma-client
//!
//! A synchronous client for paginated REST/JSON APIs.
//!
//! ## Overview
//!
//! Resource types are declared once, by name, with a root URL, a base path
//! and their associations. Each declared type then offers:
//!
//! - `list`, returning a lazy [`Paginator`] that walks `{data, next_page}` pages
//! - `retrieve`, `create`, `patch` and `delete`
//! - [`Resource`] instances with `save`, `update`, `reload` and `delete`
//! - `belongs_to` resolution from embedded objects or foreign keys, and
//!   `has_many` proxies that filter and create by owner id
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pragma_client::{Registry, RequestOptions, ResourceConfig, ResourceDefinition, RestClient, RootUrl};
//!
//! let config = ResourceConfig::builder()
//!     .root_url(RootUrl::new("http://localhost:5000/api/v1").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let registry = Registry::builder()
//!     .register(ResourceDefinition::new("BlogApi::Article").config(config))
//!     .build()
//!     .unwrap();
//!
//! let client = RestClient::with_http_client(registry).unwrap();
//! let articles = client.resource("BlogApi::Article").unwrap();
//!
//! let mut article = articles.new_resource();
//! article.set("title", "Hello");
//! article.save(RequestOptions::new()).unwrap();
//!
//! for article in articles.list(RequestOptions::new()).unwrap() {
//!     println!("{:?}", article.unwrap().get("title"));
//! }
//! ```
//!
//! ## Transports
//!
//! Every request goes through a [`clients::Transport`]. [`HttpClient`] is the
//! blocking HTTP implementation; [`clients::MockTransport`] serves queued
//! responses and records requests for tests.
//!
//! ## Logging
//!
//! Requests, page fetches and association lookups emit `tracing` debug
//! events. No subscriber is installed by the library.
//!
//! ## Design Principles
//!
//! - **No global state**: Resource types live in an explicit [`Registry`]
//! - **Fail-fast validation**: Newtypes and registries validate on construction
//! - **Thread-safe**: All public types are `Send + Sync`
//! - **Synchronous**: Each operation blocks on its request

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{BasePath, ResourceConfig, ResourceConfigBuilder, RootUrl};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    DataType, HttpClient, HttpClientBuilder, HttpError, HttpMethod, HttpRequest,
    HttpRequestBuilder, HttpResponse, HttpResponseError, InvalidHttpRequestError,
};

// Re-export resource types
pub use rest::{
    AssociationProxy, Paginator, Registry, RequestOptions, Resource, ResourceDefinition,
    ResourceError, ResourceType, RestClient,
};
