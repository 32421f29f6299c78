//! Configuration types for resource declarations.
//!
//! This module provides the per-resource configuration used to turn a
//! resource declaration into URLs and query parameters.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ResourceConfig`]: Root URL, base path, and pagination parameter names
//! - [`ResourceConfigBuilder`]: A builder for constructing [`ResourceConfig`] instances
//! - [`RootUrl`]: A validated API root URL
//! - [`BasePath`]: A validated resource base path
//!
//! # Inheritance
//!
//! A config can be [`based_on`](ResourceConfigBuilder::based_on) another one.
//! Any setting left unset falls back to the parent chain, then to the library
//! default. The usual setup is one shared config holding the root URL that
//! every resource config is based on.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use pragma_client::{ResourceConfig, RootUrl};
//!
//! let api = Arc::new(
//!     ResourceConfig::builder()
//!         .root_url(RootUrl::new("http://localhost:5000/api/v1").unwrap())
//!         .build()
//!         .unwrap(),
//! );
//!
//! let articles = ResourceConfig::builder()
//!     .based_on(Arc::clone(&api))
//!     .base_path("/articles")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(articles.root_url().unwrap().as_ref(), "http://localhost:5000/api/v1");
//! assert_eq!(articles.base_path().unwrap().as_ref(), "/articles");
//! assert_eq!(articles.page_param(), "page");
//! ```

mod newtypes;

pub use newtypes::{BasePath, RootUrl};

use std::sync::Arc;

use crate::error::ConfigError;

/// Default query parameter carrying the page number.
pub const DEFAULT_PAGE_PARAM: &str = "page";

/// Default query parameter carrying the page size.
pub const DEFAULT_PER_PAGE_PARAM: &str = "per_page";

/// Configuration for one resource type.
///
/// Every field is optional; unset fields are resolved through the
/// [`based_on`](ResourceConfigBuilder::based_on) chain. Configs are
/// immutable once built, so a parent can be shared behind an [`Arc`].
///
/// # Thread Safety
///
/// `ResourceConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceConfig {
    root_url: Option<RootUrl>,
    base_path: Option<BasePath>,
    page_param: Option<String>,
    per_page_param: Option<String>,
    based_on: Option<Arc<ResourceConfig>>,
}

impl ResourceConfig {
    /// Creates a new builder for constructing a `ResourceConfig`.
    #[must_use]
    pub fn builder() -> ResourceConfigBuilder {
        ResourceConfigBuilder::new()
    }

    /// Returns the root URL, falling back to the parent chain.
    #[must_use]
    pub fn root_url(&self) -> Option<&RootUrl> {
        self.root_url
            .as_ref()
            .or_else(|| self.based_on.as_deref().and_then(Self::root_url))
    }

    /// Returns the explicitly configured base path, falling back to the parent chain.
    ///
    /// `None` means the resource type derives its path from its own name.
    #[must_use]
    pub fn base_path(&self) -> Option<&BasePath> {
        self.base_path
            .as_ref()
            .or_else(|| self.based_on.as_deref().and_then(Self::base_path))
    }

    /// Returns the page number parameter name (default: `page`).
    #[must_use]
    pub fn page_param(&self) -> &str {
        self.lookup(|c| c.page_param.as_deref())
            .unwrap_or(DEFAULT_PAGE_PARAM)
    }

    /// Returns the page size parameter name (default: `per_page`).
    #[must_use]
    pub fn per_page_param(&self) -> &str {
        self.lookup(|c| c.per_page_param.as_deref())
            .unwrap_or(DEFAULT_PER_PAGE_PARAM)
    }

    /// Returns the config this one is based on, if any.
    #[must_use]
    pub fn based_on(&self) -> Option<&Arc<Self>> {
        self.based_on.as_ref()
    }

    fn lookup<'a>(&'a self, field: impl Fn(&'a Self) -> Option<&'a str>) -> Option<&'a str> {
        let mut current = Some(self);
        while let Some(config) = current {
            if let Some(value) = field(config) {
                return Some(value);
            }
            current = config.based_on.as_deref();
        }
        None
    }
}

// Verify ResourceConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceConfig>();
};

/// Builder for constructing [`ResourceConfig`] instances.
///
/// All fields are optional. [`RootUrl`] is passed pre-validated; string
/// values are checked by [`build`](Self::build).
///
/// # Defaults
///
/// - `root_url`: inherited, no default
/// - `base_path`: inherited, otherwise derived from the resource name
/// - `page_param`: `page`
/// - `per_page_param`: `per_page`
#[derive(Debug, Default)]
pub struct ResourceConfigBuilder {
    root_url: Option<RootUrl>,
    base_path: Option<String>,
    page_param: Option<String>,
    per_page_param: Option<String>,
    based_on: Option<Arc<ResourceConfig>>,
}

impl ResourceConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API root URL.
    #[must_use]
    pub fn root_url(mut self, url: RootUrl) -> Self {
        self.root_url = Some(url);
        self
    }

    /// Sets the resource base path (e.g., `/articles`).
    #[must_use]
    pub fn base_path(mut self, path: impl Into<String>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Sets the query parameter used for the page number.
    #[must_use]
    pub fn page_param(mut self, param: impl Into<String>) -> Self {
        self.page_param = Some(param.into());
        self
    }

    /// Sets the query parameter used for the page size.
    #[must_use]
    pub fn per_page_param(mut self, param: impl Into<String>) -> Self {
        self.per_page_param = Some(param.into());
        self
    }

    /// Links this config to a parent whose settings are inherited.
    #[must_use]
    pub fn based_on(mut self, parent: Arc<ResourceConfig>) -> Self {
        self.based_on = Some(parent);
        self
    }

    /// Builds the [`ResourceConfig`], validating the string settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyBasePath`] for an empty or separator-only
    /// base path and [`ConfigError::EmptyParamName`] for blank parameter names.
    pub fn build(self) -> Result<ResourceConfig, ConfigError> {
        let base_path = self.base_path.map(BasePath::new).transpose()?;
        let page_param = validate_param(self.page_param, "page_param")?;
        let per_page_param = validate_param(self.per_page_param, "per_page_param")?;

        Ok(ResourceConfig {
            root_url: self.root_url,
            base_path,
            page_param,
            per_page_param,
            based_on: self.based_on,
        })
    }
}

fn validate_param(
    param: Option<String>,
    field: &'static str,
) -> Result<Option<String>, ConfigError> {
    match param {
        Some(p) if p.trim().is_empty() => Err(ConfigError::EmptyParamName { field }),
        other => Ok(other),
    }
}
