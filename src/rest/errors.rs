//! Resource-specific error types for REST API operations.
//!
//! This module contains the error type returned by every resource operation,
//! extending [`HttpError`] with resource-specific semantics like `NotFound`
//! and `ValidationFailed`.
//!
//! # Error Handling
//!
//! Transport failures are mapped to semantic error variants:
//!
//! - **404** with an id: [`ResourceError::NotFound`] - Resource doesn't exist
//! - **400/422** on create or patch: [`ResourceError::ValidationFailed`] - Entity rejected
//! - **Anything else**: [`ResourceError::Transport`] - Wrapped HTTP error
//!
//! # Example
//!
//! ```rust,ignore
//! use pragma_client::rest::ResourceError;
//!
//! match articles.retrieve(123, RequestOptions::new()) {
//!     Ok(article) => println!("Found: {:?}", article.get("title")),
//!     Err(ResourceError::NotFound { resource, id }) => {
//!         println!("{} with id {} not found", resource, id);
//!     }
//!     Err(ResourceError::ValidationFailed { errors, .. }) => {
//!         for (field, messages) in errors {
//!             println!("{}: {:?}", field, messages);
//!         }
//!     }
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```

use std::collections::HashMap;

use crate::clients::HttpError;
use crate::error::ConfigError;
use crate::rest::path::ResourceOperation;
use thiserror::Error;

/// Error type for resource operations.
///
/// # Example
///
/// ```rust
/// use pragma_client::rest::ResourceError;
/// use std::collections::HashMap;
///
/// let error = ResourceError::NotFound {
///     resource: "BlogApi::Article".to_string(),
///     id: "123".to_string(),
/// };
/// assert!(error.to_string().contains("BlogApi::Article"));
/// assert!(error.to_string().contains("123"));
///
/// let mut errors = HashMap::new();
/// errors.insert("title".to_string(), vec!["can't be blank".to_string()]);
/// let error = ResourceError::ValidationFailed {
///     resource: "BlogApi::Article".to_string(),
///     errors,
///     request_id: Some("abc-123".to_string()),
/// };
/// assert!(error.to_string().contains("Validation failed"));
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// A transport-level error that has no more specific meaning.
    ///
    /// Covers network failures, unexpected statuses and undecodable bodies.
    #[error(transparent)]
    Transport(#[from] HttpError),

    /// The resource was not found (HTTP 404).
    #[error("{resource} with id {id} not found")]
    NotFound {
        /// The resource type name (e.g., "BlogApi::Article").
        resource: String,
        /// The ID that was requested.
        id: String,
    },

    /// The API rejected a create or patch request (HTTP 400/422).
    #[error("Validation failed for {resource}: {errors:?}")]
    ValidationFailed {
        /// The resource type name.
        resource: String,
        /// A map of field names to error messages.
        errors: HashMap<String, Vec<String>>,
        /// The request ID for debugging (from X-Request-Id header).
        request_id: Option<String>,
    },

    /// The type an association points to is not registered.
    #[error("Expected association {association} to correspond to {expected}, but the resource could not be found")]
    UnresolvedAssociation {
        /// The association, as `Owner.property`.
        association: String,
        /// The resource type name derived from the association.
        expected: String,
    },

    /// The operation requires a persisted resource but `id` is absent.
    #[error("Cannot {operation} {resource} without an id")]
    MissingId {
        /// The resource type name.
        resource: String,
        /// The operation being attempted.
        operation: &'static str,
    },

    /// The resource type is misconfigured.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No resource type is registered under the name.
    #[error("Resource '{name}' is not registered")]
    UnknownResource {
        /// The requested resource type name.
        name: String,
    },

    /// The resource type declares no association for the property.
    #[error("{resource} has no association named '{property}'")]
    UnknownAssociation {
        /// The resource type name.
        resource: String,
        /// The requested property.
        property: String,
    },

    /// The association exists but is of the other kind.
    #[error("Association {association} is declared as {kind}")]
    WrongAssociationKind {
        /// The association, as `Owner.property`.
        association: String,
        /// The declared kind (`belongs_to` or `has_many`).
        kind: &'static str,
    },

    /// A response or property could not be decoded into the expected shape.
    #[error("Could not decode {resource}: {message}")]
    Decode {
        /// The resource type name.
        resource: String,
        /// What went wrong.
        message: String,
    },
}

impl ResourceError {
    /// Maps a transport error raised by a resource operation.
    ///
    /// - 404 with an id -> `NotFound`
    /// - 400/422 on create or patch -> `ValidationFailed` (parsing errors from body)
    /// - Other -> `Transport`
    ///
    /// # Example
    ///
    /// ```rust
    /// use pragma_client::clients::{HttpError, HttpResponseError};
    /// use pragma_client::rest::{ResourceError, ResourceOperation};
    /// use serde_json::json;
    ///
    /// let http = HttpError::Response(HttpResponseError {
    ///     code: 404,
    ///     message: "{}".to_string(),
    ///     body: json!({"error": "Not found"}),
    ///     error_reference: None,
    /// });
    ///
    /// let error = ResourceError::from_http_error(
    ///     http,
    ///     "BlogApi::Article",
    ///     ResourceOperation::Retrieve,
    ///     Some("123"),
    /// );
    /// assert!(matches!(error, ResourceError::NotFound { .. }));
    /// ```
    #[must_use]
    pub fn from_http_error(
        error: HttpError,
        resource: &str,
        operation: ResourceOperation,
        id: Option<&str>,
    ) -> Self {
        let HttpError::Response(response) = error else {
            return Self::Transport(error);
        };

        match (response.code, id) {
            (404, Some(id)) => Self::NotFound {
                resource: resource.to_string(),
                id: id.to_string(),
            },
            (400 | 422, _) if operation.sends_entity() => Self::ValidationFailed {
                resource: resource.to_string(),
                errors: parse_validation_errors(&response.body),
                request_id: response.error_reference,
            },
            _ => Self::Transport(HttpError::Response(response)),
        }
    }

    /// Returns the request ID if available.
    ///
    /// Useful for debugging and error reporting.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::ValidationFailed { request_id, .. } => request_id.as_deref(),
            Self::Transport(HttpError::Response(e)) => e.error_reference.as_deref(),
            _ => None,
        }
    }

    /// Returns the HTTP status behind this error, if one was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status(),
            Self::NotFound { .. } => Some(404),
            _ => None,
        }
    }
}

/// Parses validation errors from an API response body.
///
/// Object format:
/// ```json
/// { "errors": { "title": ["can't be blank"], "category": ["must exist"] } }
/// ```
///
/// Array format (stored under `base`):
/// ```json
/// { "errors": ["Title can't be blank"] }
/// ```
///
/// A bare string is also stored under `base`.
fn parse_validation_errors(body: &serde_json::Value) -> HashMap<String, Vec<String>> {
    let mut result = HashMap::new();

    if let Some(errors) = body.get("errors") {
        match errors {
            serde_json::Value::Object(map) => {
                for (field, messages) in map {
                    let msgs: Vec<String> = match messages {
                        serde_json::Value::Array(arr) => arr
                            .iter()
                            .filter_map(|v| v.as_str().map(ToString::to_string))
                            .collect(),
                        serde_json::Value::String(s) => vec![s.clone()],
                        _ => vec![messages.to_string()],
                    };
                    result.insert(field.clone(), msgs);
                }
            }
            serde_json::Value::Array(arr) => {
                let msgs: Vec<String> = arr
                    .iter()
                    .filter_map(|v| v.as_str().map(ToString::to_string))
                    .collect();
                if !msgs.is_empty() {
                    result.insert("base".to_string(), msgs);
                }
            }
            serde_json::Value::String(s) => {
                result.insert("base".to_string(), vec![s.clone()]);
            }
            _ => {}
        }
    }

    result
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpResponseError;
    use serde_json::json;

    fn response_error(code: u16, body: serde_json::Value) -> HttpError {
        HttpError::Response(HttpResponseError {
            code,
            message: body.to_string(),
            body,
            error_reference: Some("req-1".to_string()),
        })
    }

    #[test]
    fn test_not_found_error_formats_message_with_resource_and_id() {
        let error = ResourceError::NotFound {
            resource: "BlogApi::Article".to_string(),
            id: "123456".to_string(),
        };
        let message = error.to_string();

        assert!(message.contains("BlogApi::Article"));
        assert!(message.contains("123456"));
        assert!(message.contains("not found"));
    }

    #[test]
    fn test_404_with_id_maps_to_not_found() {
        let error = ResourceError::from_http_error(
            response_error(404, json!({"error": "Not found"})),
            "BlogApi::Article",
            ResourceOperation::Retrieve,
            Some("123"),
        );

        assert!(matches!(
            error,
            ResourceError::NotFound { ref resource, ref id }
                if resource == "BlogApi::Article" && id == "123"
        ));
        assert_eq!(error.status(), Some(404));
    }

    #[test]
    fn test_404_without_id_stays_a_transport_error() {
        let error = ResourceError::from_http_error(
            response_error(404, json!({})),
            "BlogApi::Article",
            ResourceOperation::List,
            None,
        );

        assert!(matches!(error, ResourceError::Transport(_)));
        assert_eq!(error.status(), Some(404));
    }

    #[test]
    fn test_422_on_create_maps_to_validation_failed() {
        let body = json!({
            "errors": {
                "title": ["can't be blank"],
                "category": ["must exist", "is invalid"]
            }
        });

        let error = ResourceError::from_http_error(
            response_error(422, body),
            "BlogApi::Article",
            ResourceOperation::Create,
            None,
        );

        if let ResourceError::ValidationFailed {
            errors, request_id, ..
        } = error
        {
            assert_eq!(
                errors.get("title"),
                Some(&vec!["can't be blank".to_string()])
            );
            assert_eq!(errors.get("category").map(Vec::len), Some(2));
            assert_eq!(request_id, Some("req-1".to_string()));
        } else {
            panic!("Expected ValidationFailed variant");
        }
    }

    #[test]
    fn test_400_on_patch_maps_to_validation_failed() {
        let error = ResourceError::from_http_error(
            response_error(400, json!({"errors": "Bad entity"})),
            "BlogApi::Article",
            ResourceOperation::Patch,
            Some("1"),
        );

        assert!(matches!(error, ResourceError::ValidationFailed { .. }));
        assert_eq!(error.request_id(), Some("req-1"));
    }

    #[test]
    fn test_422_on_read_stays_a_transport_error() {
        let error = ResourceError::from_http_error(
            response_error(422, json!({"errors": ["nope"]})),
            "BlogApi::Article",
            ResourceOperation::Delete,
            Some("1"),
        );

        assert!(matches!(error, ResourceError::Transport(_)));
    }

    #[test]
    fn test_other_codes_map_to_transport() {
        let error = ResourceError::from_http_error(
            response_error(500, json!({"error": "Internal error"})),
            "BlogApi::Article",
            ResourceOperation::Create,
            None,
        );

        assert!(matches!(error, ResourceError::Transport(_)));
        assert_eq!(error.request_id(), Some("req-1"));
    }

    #[test]
    fn test_parse_validation_errors_object_format() {
        let body = json!({
            "errors": {
                "title": ["can't be blank"],
                "tags": ["is invalid", "has too many items"]
            }
        });

        let errors = parse_validation_errors(&body);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("tags").map(Vec::len), Some(2));
    }

    #[test]
    fn test_parse_validation_errors_array_and_string_formats() {
        let errors = parse_validation_errors(&json!({"errors": ["Error 1", "Error 2"]}));
        assert_eq!(errors.get("base").map(Vec::len), Some(2));

        let errors = parse_validation_errors(&json!({"errors": "Single"}));
        assert_eq!(errors.get("base"), Some(&vec!["Single".to_string()]));

        let errors = parse_validation_errors(&json!({"message": "no errors key"}));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_association_errors_name_both_sides() {
        let error = ResourceError::UnresolvedAssociation {
            association: "BlogApi::Category.articles".to_string(),
            expected: "BlogApi::Article".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("BlogApi::Category.articles"));
        assert!(message.contains("BlogApi::Article"));
    }

    #[test]
    fn test_config_error_conversion() {
        let error: ResourceError = ConfigError::EmptyBasePath.into();
        assert!(matches!(error, ResourceError::Config(_)));
    }
}
