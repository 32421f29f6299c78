//! Error types for client configuration.
//!
//! This module contains the errors raised while declaring resource types:
//! invalid URLs or paths, bad parameter names, and registry conflicts.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. A missing root URL is the one configuration problem
//! that can only be detected later, when a resource type first builds a URL.
//!
//! # Example
//!
//! ```rust
//! use pragma_client::{ConfigError, RootUrl};
//!
//! let result = RootUrl::new("localhost:5000");
//! assert!(matches!(result, Err(ConfigError::InvalidRootUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring resource types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Root URL is invalid.
    #[error("Invalid root URL '{url}'. Please provide an absolute URL with scheme (e.g., 'https://api.example.com/v1').")]
    InvalidRootUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Base path is empty once separators are stripped.
    #[error("Base path cannot be empty. Provide a path such as '/articles'.")]
    EmptyBasePath,

    /// A pagination parameter name is empty.
    #[error("The '{field}' parameter name cannot be empty.")]
    EmptyParamName {
        /// The configuration field that was empty.
        field: &'static str,
    },

    /// A resource type name is not a valid `Namespace::Type` path.
    #[error("Invalid resource name '{name}'. Expected a type path such as 'BlogApi::Article'.")]
    InvalidResourceName {
        /// The invalid name that was provided.
        name: String,
    },

    /// The same resource type was registered twice.
    #[error("Resource '{name}' is already registered.")]
    DuplicateResource {
        /// The duplicated resource name.
        name: String,
    },

    /// The same association property was declared twice on one resource type.
    #[error("Association '{association}' is declared more than once.")]
    DuplicateAssociation {
        /// The duplicated association, as `Owner.property`.
        association: String,
    },

    /// No root URL could be resolved for a resource type.
    #[error("No root URL configured for '{resource}'. Set one on the resource or on a config it is based on.")]
    MissingRootUrl {
        /// The resource type that has no root URL.
        resource: String,
    },
}
