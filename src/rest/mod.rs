//! Resource types, instances, pagination and associations.
//!
//! This module turns declared resource types into working API clients:
//!
//! - **[`ResourceDefinition`] / [`Registry`]**: Declarations of resource types
//!   and their `belongs_to` / `has_many` associations
//! - **[`RestClient`]**: Binds a registry to a [`Transport`](crate::clients::Transport)
//! - **[`ResourceType`]**: `list`, `retrieve`, `create`, `patch` and `delete`
//! - **[`Resource`]**: One entity as a property map, with `save`, `update`,
//!   `reload` and `delete`
//! - **[`Paginator`]**: Lazy iteration over every page of a collection
//! - **[`AssociationProxy`]**: A `has_many` bound to one owner
//! - **[`ResourceError`]**: Semantic error types for resource operations
//!
//! # Example
//!
//! ```rust,no_run
//! use pragma_client::{ResourceConfig, RootUrl};
//! use pragma_client::rest::{Registry, RequestOptions, ResourceDefinition, RestClient};
//!
//! let config = ResourceConfig::builder()
//!     .root_url(RootUrl::new("http://localhost:5000/api/v1").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let registry = Registry::builder()
//!     .register(
//!         ResourceDefinition::new("BlogApi::Article")
//!             .config(config.clone())
//!             .belongs_to("category"),
//!     )
//!     .register(
//!         ResourceDefinition::new("BlogApi::Category")
//!             .config(config)
//!             .has_many("articles"),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let client = RestClient::with_http_client(registry).unwrap();
//! let categories = client.resource("BlogApi::Category").unwrap();
//!
//! let category = categories.retrieve(7, RequestOptions::new()).unwrap();
//! for article in category.has_many("articles").unwrap().all(RequestOptions::new()).unwrap() {
//!     let article = article.unwrap();
//!     println!("{:?}", article.get("title"));
//! }
//! ```

mod association;
mod client;
mod errors;
pub mod inflector;
mod options;
mod pagination;
mod path;
mod registry;
mod resource;
mod resource_type;

// Public exports
pub use association::{Associated, Association, AssociationKind, AssociationProxy, ProxyIter};
pub use client::RestClient;
pub use errors::ResourceError;
pub use options::{RequestOptions, DEFAULT_ACCEPT};
pub use pagination::{Page, Paginator};
pub use path::{build_url, id_fragment, ResourceOperation};
pub use registry::{Registry, RegistryBuilder, ResourceDefinition};
pub use resource::Resource;
pub use resource_type::ResourceType;
