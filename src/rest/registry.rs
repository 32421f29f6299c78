//! Resource type declarations and the registry that holds them.
//!
//! A [`ResourceDefinition`] names a resource type, attaches its
//! [`ResourceConfig`], and declares its associations. Definitions are
//! collected into a [`Registry`] at startup; the registry is immutable
//! afterwards and shared by every [`RestClient`](crate::rest::RestClient).
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use pragma_client::{ResourceConfig, RootUrl};
//! use pragma_client::rest::{Registry, ResourceDefinition};
//!
//! let api = Arc::new(
//!     ResourceConfig::builder()
//!         .root_url(RootUrl::new("http://localhost:5000/api/v1").unwrap())
//!         .build()
//!         .unwrap(),
//! );
//! let config = ResourceConfig::builder().based_on(api).build().unwrap();
//!
//! let registry = Registry::builder()
//!     .register(
//!         ResourceDefinition::new("BlogApi::Category")
//!             .config(config.clone())
//!             .has_many("articles"),
//!     )
//!     .register(
//!         ResourceDefinition::new("BlogApi::Article")
//!             .config(config)
//!             .belongs_to("category"),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let articles = registry.get("BlogApi::Article").unwrap();
//! assert_eq!(articles.base_path(), "/articles");
//! assert_eq!(articles.association("category").unwrap().target(), "BlogApi::Category");
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::config::{ResourceConfig, RootUrl};
use crate::error::ConfigError;
use crate::rest::association::{Association, AssociationKind};
use crate::rest::inflector::{self, NAMESPACE_SEPARATOR};

/// The declaration of one resource type.
///
/// The base path defaults to the pluralized, underscored type name
/// (`BlogApi::BlogPost` -> `/blog_posts`) unless the config sets one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceDefinition {
    name: String,
    config: ResourceConfig,
    default_base_path: String,
    associations: Vec<Association>,
}

impl ResourceDefinition {
    /// Starts a declaration for the named type (e.g., `BlogApi::Article`).
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let default_base_path = format!(
            "/{}",
            inflector::pluralize(&inflector::underscore(inflector::demodulize(&name)))
        );
        Self {
            name,
            config: ResourceConfig::default(),
            default_base_path,
            associations: Vec::new(),
        }
    }

    /// Attaches the resource configuration.
    #[must_use]
    pub fn config(mut self, config: ResourceConfig) -> Self {
        self.config = config;
        self
    }

    /// Declares that each instance references one `property` target.
    #[must_use]
    pub fn belongs_to(mut self, property: impl Into<String>) -> Self {
        self.associations.push(Association::new(
            self.name.clone(),
            AssociationKind::BelongsTo,
            property,
        ));
        self
    }

    /// Declares that each instance is the parent of a `property` collection.
    #[must_use]
    pub fn has_many(mut self, property: impl Into<String>) -> Self {
        self.associations.push(Association::new(
            self.name.clone(),
            AssociationKind::HasMany,
            property,
        ));
        self
    }

    /// Returns the full type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the type name without its namespace.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        inflector::demodulize(&self.name)
    }

    /// Returns the namespace, if the name has one.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.name
            .rsplit_once(NAMESPACE_SEPARATOR)
            .map(|(namespace, _)| namespace)
    }

    /// Returns the attached configuration.
    #[must_use]
    pub const fn resource_config(&self) -> &ResourceConfig {
        &self.config
    }

    /// Returns the configured base path, or the one derived from the name.
    #[must_use]
    pub fn base_path(&self) -> &str {
        self.config
            .base_path()
            .map_or(self.default_base_path.as_str(), AsRef::as_ref)
    }

    /// Returns the resolved root URL.
    #[must_use]
    pub fn root_url(&self) -> Option<&RootUrl> {
        self.config.root_url()
    }

    /// Returns the page number parameter name.
    #[must_use]
    pub fn page_param(&self) -> &str {
        self.config.page_param()
    }

    /// Returns the page size parameter name.
    #[must_use]
    pub fn per_page_param(&self) -> &str {
        self.config.per_page_param()
    }

    /// Returns every declared association.
    #[must_use]
    pub fn associations(&self) -> &[Association] {
        &self.associations
    }

    /// Returns the association declared for `property`.
    #[must_use]
    pub fn association(&self, property: &str) -> Option<&Association> {
        self.associations.iter().find(|a| a.property() == property)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let valid_segment = |segment: &str| {
            segment.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
                && segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        };
        if !self.name.split(NAMESPACE_SEPARATOR).all(valid_segment) {
            return Err(ConfigError::InvalidResourceName {
                name: self.name.clone(),
            });
        }

        let mut seen = HashSet::new();
        for association in &self.associations {
            if !seen.insert(association.property()) {
                return Err(ConfigError::DuplicateAssociation {
                    association: association.association_name(),
                });
            }
        }

        Ok(())
    }
}

/// The immutable set of declared resource types, keyed by full name.
///
/// # Thread Safety
///
/// `Registry` is `Send + Sync`; definitions are shared behind [`Arc`].
#[derive(Clone, Debug, Default)]
pub struct Registry {
    resources: HashMap<String, Arc<ResourceDefinition>>,
}

// Verify Registry is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Registry>();
};

impl Registry {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Returns the definition registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<ResourceDefinition>> {
        self.resources.get(name)
    }

    /// Returns `true` if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.resources.contains_key(name)
    }

    /// Returns every registered name, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.resources.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered resource types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// Builder collecting [`ResourceDefinition`]s into a [`Registry`].
///
/// Association targets are not checked here; a missing target surfaces as
/// [`ResourceError::UnresolvedAssociation`](crate::rest::ResourceError::UnresolvedAssociation)
/// when the association is first resolved.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    definitions: Vec<ResourceDefinition>,
}

impl RegistryBuilder {
    /// Adds a resource type.
    #[must_use]
    pub fn register(mut self, definition: ResourceDefinition) -> Self {
        self.definitions.push(definition);
        self
    }

    /// Validates the definitions and builds the [`Registry`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidResourceName`] for a name that is not a
    /// `Namespace::Type` path, [`ConfigError::DuplicateResource`] when a name
    /// is registered twice, and [`ConfigError::DuplicateAssociation`] when a
    /// property is declared twice on one type.
    pub fn build(self) -> Result<Registry, ConfigError> {
        let mut resources = HashMap::with_capacity(self.definitions.len());

        for definition in self.definitions {
            definition.validate()?;
            if resources.contains_key(definition.name()) {
                return Err(ConfigError::DuplicateResource {
                    name: definition.name,
                });
            }
            resources.insert(definition.name.clone(), Arc::new(definition));
        }

        Ok(Registry { resources })
    }
}
