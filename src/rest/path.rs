//! URL building for resource operations.
//!
//! Every resource URL is built by joining the root URL, the base path, and an
//! optional id. Each fragment has its leading and trailing separators stripped
//! before joining with a single `/`, so callers may write base paths with or
//! without slashes.
//!
//! # Example
//!
//! ```rust
//! use pragma_client::rest::build_url;
//!
//! let url = build_url(["http://localhost:5000/api/v1/", "/articles/", "42"]);
//! assert_eq!(url, "http://localhost:5000/api/v1/articles/42");
//! ```

use crate::clients::HttpMethod;

/// Operations that can be performed on a resource type.
///
/// Each operation corresponds to a specific HTTP method and URL pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// List resources page by page (GET /resources?page=n).
    List,
    /// Retrieve a single resource by ID (GET /resources/{id}).
    Retrieve,
    /// Create a new resource (POST /resources).
    Create,
    /// Partially update an existing resource (PATCH /resources/{id}).
    Patch,
    /// Delete a resource (DELETE /resources/{id}).
    Delete,
}

impl ResourceOperation {
    /// Returns the default HTTP method for this operation.
    #[must_use]
    pub const fn default_http_method(&self) -> HttpMethod {
        match self {
            Self::List | Self::Retrieve => HttpMethod::Get,
            Self::Create => HttpMethod::Post,
            Self::Patch => HttpMethod::Patch,
            Self::Delete => HttpMethod::Delete,
        }
    }

    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Retrieve => "retrieve",
            Self::Create => "create",
            Self::Patch => "patch",
            Self::Delete => "delete",
        }
    }

    /// Returns `true` for operations that send an entity body.
    #[must_use]
    pub const fn sends_entity(&self) -> bool {
        matches!(self, Self::Create | Self::Patch)
    }
}

/// Joins URL fragments with single separators.
///
/// Leading and trailing `/` are stripped from every fragment; fragments that
/// are empty afterwards are skipped.
#[must_use]
pub fn build_url<I, S>(fragments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut url = String::new();
    for fragment in fragments {
        let part = fragment.as_ref().trim_matches('/');
        if part.is_empty() {
            continue;
        }
        if !url.is_empty() {
            url.push('/');
        }
        url.push_str(part);
    }
    url
}

/// Renders an id value as a URL fragment.
///
/// Strings are used verbatim and numbers in their JSON form. Any other value
/// (null, booleans, arrays, objects) is not a usable id.
#[must_use]
pub fn id_fragment(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
