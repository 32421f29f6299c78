//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated API root URL (e.g., `http://localhost:5000/api/v1`).
///
/// The URL must carry a scheme and a host. Anything after the host (port,
/// path prefix) is kept verbatim and joined with resource base paths when
/// requests are built.
///
/// # Example
///
/// ```rust
/// use pragma_client::RootUrl;
///
/// let url = RootUrl::new("http://localhost:5000/api/v1/").unwrap();
/// assert_eq!(url.scheme(), "http");
/// assert_eq!(url.host_name(), "localhost");
/// assert_eq!(url.as_ref(), "http://localhost:5000/api/v1/");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RootUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl RootUrl {
    /// Creates a new validated root URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRootUrl`] if the URL has no scheme or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidRootUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidRootUrl { url: url.clone() });
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidRootUrl { url });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl AsRef<str> for RootUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for RootUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl Serialize for RootUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for RootUrl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let url = String::deserialize(deserializer)?;
        Self::new(url).map_err(de::Error::custom)
    }
}

/// A validated resource base path (e.g., `/articles`).
///
/// Leading and trailing separators are allowed and ignored when URLs are
/// joined, but the path must contain something besides separators.
///
/// # Example
///
/// ```rust
/// use pragma_client::BasePath;
///
/// let path = BasePath::new("/articles/").unwrap();
/// assert_eq!(path.as_ref(), "/articles/");
/// assert_eq!(path.trimmed(), "articles");
///
/// assert!(BasePath::new("/").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasePath(String);

impl BasePath {
    /// Creates a new validated base path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyBasePath`] if the path is empty or only separators.
    pub fn new(path: impl Into<String>) -> Result<Self, ConfigError> {
        let path = path.into().trim().to_string();
        if path.trim_matches('/').is_empty() {
            return Err(ConfigError::EmptyBasePath);
        }
        Ok(Self(path))
    }

    /// Returns the path without leading or trailing separators.
    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.0.trim_matches('/')
    }
}

impl AsRef<str> for BasePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
