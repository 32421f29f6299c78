//! Associations between resource types.
//!
//! An [`Association`] is declared on an owning resource type with
//! [`ResourceDefinition::belongs_to`](crate::rest::ResourceDefinition::belongs_to)
//! or [`ResourceDefinition::has_many`](crate::rest::ResourceDefinition::has_many).
//! All derived names (target type, filter parameter, parent property) are
//! computed once at declaration, so resolution is a registry lookup.
//!
//! # Naming
//!
//! For an owner `BlogApi::Category`:
//!
//! | Declaration              | Target               | Filter        | Parent property |
//! |--------------------------|----------------------|---------------|-----------------|
//! | `has_many("articles")`   | `BlogApi::Article`   | `by_category` | `category`      |
//! | `belongs_to("author")`   | `BlogApi::Author`    | -             | -               |
//!
//! # Resolution
//!
//! - `belongs_to`: an embedded object becomes a [`Resource`] without any
//!   request; a scalar is treated as an id and retrieved; null or absent
//!   resolves to `None`.
//! - `has_many`: always an [`AssociationProxy`], which lists or creates
//!   target resources scoped to the owner.

use std::fmt;

use serde_json::{Map, Value};

use crate::rest::client::RestClient;
use crate::rest::errors::ResourceError;
use crate::rest::inflector::{self, NAMESPACE_SEPARATOR};
use crate::rest::options::RequestOptions;
use crate::rest::pagination::Paginator;
use crate::rest::path::id_fragment;
use crate::rest::resource::Resource;
use crate::rest::resource_type::ResourceType;

/// Direction of an association.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssociationKind {
    /// The owner references one target (`article.category`).
    BelongsTo,
    /// The owner is the parent of a target collection (`category.articles`).
    HasMany,
}

impl AssociationKind {
    /// Returns the declaration name (`belongs_to` or `has_many`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BelongsTo => "belongs_to",
            Self::HasMany => "has_many",
        }
    }
}

impl fmt::Display for AssociationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared relationship from an owner resource type to a target type.
///
/// # Example
///
/// ```rust
/// use pragma_client::rest::{Association, AssociationKind};
///
/// let articles = Association::new("BlogApi::Category", AssociationKind::HasMany, "articles");
///
/// assert_eq!(articles.target(), "BlogApi::Article");
/// assert_eq!(articles.association_name(), "BlogApi::Category.articles");
/// assert_eq!(articles.filter_name(), Some("by_category"));
/// assert_eq!(articles.parent_property(), Some("category"));
///
/// let category = Association::new("BlogApi::Article", AssociationKind::BelongsTo, "category");
/// assert_eq!(category.target(), "BlogApi::Category");
/// assert_eq!(category.filter_name(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Association {
    owner: String,
    kind: AssociationKind,
    property: String,
    target: String,
    filter_name: Option<String>,
    parent_property: Option<String>,
}

impl Association {
    /// Declares an association and derives its names.
    #[must_use]
    pub fn new(owner: impl Into<String>, kind: AssociationKind, property: impl Into<String>) -> Self {
        let owner = owner.into();
        let property = property.into();

        let class_name = match kind {
            AssociationKind::HasMany => inflector::classify(&inflector::singularize(&property)),
            AssociationKind::BelongsTo => inflector::classify(&property),
        };
        let target = match owner.rsplit_once(NAMESPACE_SEPARATOR) {
            Some((namespace, _)) => format!("{namespace}{NAMESPACE_SEPARATOR}{class_name}"),
            None => class_name,
        };

        let owner_param = inflector::underscore(inflector::demodulize(&owner));
        let (filter_name, parent_property) = match kind {
            AssociationKind::HasMany => (Some(format!("by_{owner_param}")), Some(owner_param)),
            AssociationKind::BelongsTo => (None, None),
        };

        Self {
            owner,
            kind,
            property,
            target,
            filter_name,
            parent_property,
        }
    }

    /// Returns the owning resource type name.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the association direction.
    #[must_use]
    pub const fn kind(&self) -> AssociationKind {
        self.kind
    }

    /// Returns the declared property name.
    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Returns the derived target resource type name.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns `Owner.property`, used in error messages.
    #[must_use]
    pub fn association_name(&self) -> String {
        format!("{}.{}", self.owner, self.property)
    }

    /// Returns `true` for `belongs_to` associations.
    #[must_use]
    pub const fn is_belongs_to(&self) -> bool {
        matches!(self.kind, AssociationKind::BelongsTo)
    }

    /// Returns `true` for `has_many` associations.
    #[must_use]
    pub const fn is_has_many(&self) -> bool {
        matches!(self.kind, AssociationKind::HasMany)
    }

    /// Returns the list filter parameter (`by_<owner>`); `has_many` only.
    #[must_use]
    pub fn filter_name(&self) -> Option<&str> {
        self.filter_name.as_deref()
    }

    /// Returns the entity property naming the parent (`<owner>`); `has_many` only.
    #[must_use]
    pub fn parent_property(&self) -> Option<&str> {
        self.parent_property.as_deref()
    }

    /// Looks up the target resource type.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnresolvedAssociation`] if the target is not registered.
    pub fn resolve_target(&self, client: &RestClient) -> Result<ResourceType, ResourceError> {
        client
            .resource(&self.target)
            .map_err(|_| ResourceError::UnresolvedAssociation {
                association: self.association_name(),
                expected: self.target.clone(),
            })
    }

    /// Resolves the association for an owner instance.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnresolvedAssociation`] if the target type is
    /// not registered, and any error from the `retrieve` a scalar
    /// `belongs_to` value triggers.
    pub fn load(&self, owner: &Resource) -> Result<Associated, ResourceError> {
        let target = self.resolve_target(owner.resource_type().client())?;

        match self.kind {
            AssociationKind::BelongsTo => self.load_belongs_to(owner, &target).map(Associated::One),
            AssociationKind::HasMany => Ok(Associated::Many(AssociationProxy {
                owner: owner.clone(),
                association: self.clone(),
                target,
            })),
        }
    }

    fn load_belongs_to(
        &self,
        owner: &Resource,
        target: &ResourceType,
    ) -> Result<Option<Resource>, ResourceError> {
        match owner.get(&self.property) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(embedded)) => {
                tracing::debug!(
                    association = %self.association_name(),
                    "Resolved association from embedded data"
                );
                Ok(Some(target.build(embedded.clone())))
            }
            Some(value) => {
                let id = id_fragment(value).ok_or_else(|| ResourceError::Decode {
                    resource: self.owner.clone(),
                    message: format!("{} is neither an object nor an id", self.property),
                })?;
                tracing::debug!(
                    association = %self.association_name(),
                    id = %id,
                    "Retrieving associated resource"
                );
                target.retrieve(&id, RequestOptions::new()).map(Some)
            }
        }
    }
}

/// The result of resolving an association.
#[derive(Clone, Debug)]
pub enum Associated {
    /// A resolved `belongs_to` (`None` when the property is null or absent).
    One(Option<Resource>),
    /// A `has_many` proxy.
    Many(AssociationProxy),
}

impl Associated {
    /// Returns the `belongs_to` result, if this is one.
    #[must_use]
    pub fn into_one(self) -> Option<Option<Resource>> {
        match self {
            Self::One(resource) => Some(resource),
            Self::Many(_) => None,
        }
    }

    /// Returns the `has_many` proxy, if this is one.
    #[must_use]
    pub fn into_many(self) -> Option<AssociationProxy> {
        match self {
            Self::Many(proxy) => Some(proxy),
            Self::One(_) => None,
        }
    }
}

/// A `has_many` association bound to one owner instance.
///
/// Created fresh on each access; holds a snapshot of the owner.
///
/// # Example
///
/// ```rust,ignore
/// let articles = category.has_many("articles")?;
///
/// for article in articles.all(RequestOptions::new())? {
///     println!("{:?}", article?.get("title"));
/// }
///
/// // Without options, iterate the proxy directly.
/// for article in &articles {
///     println!("{:?}", article?.get("title"));
/// }
///
/// let mut entity = serde_json::Map::new();
/// entity.insert("title".into(), "Hello".into());
/// let article = articles.create(entity, RequestOptions::new())?;
/// ```
#[derive(Clone, Debug)]
pub struct AssociationProxy {
    owner: Resource,
    association: Association,
    target: ResourceType,
}

impl AssociationProxy {
    /// Returns the owning instance.
    #[must_use]
    pub const fn owner(&self) -> &Resource {
        &self.owner
    }

    /// Returns the association descriptor.
    #[must_use]
    pub const fn association(&self) -> &Association {
        &self.association
    }

    /// Returns the target resource type.
    #[must_use]
    pub const fn target(&self) -> &ResourceType {
        &self.target
    }

    fn owner_id(&self, operation: &'static str) -> Result<Value, ResourceError> {
        self.owner
            .id()
            .cloned()
            .ok_or_else(|| ResourceError::MissingId {
                resource: self.association.owner.clone(),
                operation,
            })
    }

    /// Lists target resources filtered by `by_<owner> = owner id`.
    ///
    /// The filter overrides a caller param of the same name.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if the owner is not persisted, or
    /// any error from [`ResourceType::list`].
    pub fn all(&self, mut options: RequestOptions) -> Result<Paginator, ResourceError> {
        let owner_id = self.owner_id("list associated resources of")?;
        if let Some(filter) = self.association.filter_name() {
            options.set_param(filter, owner_id);
        }
        self.target.list(options)
    }

    /// Creates a target resource with `<owner> = owner id` merged into the entity.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if the owner is not persisted, or
    /// any error from [`ResourceType::create`].
    pub fn create(
        &self,
        mut entity: Map<String, Value>,
        options: RequestOptions,
    ) -> Result<Resource, ResourceError> {
        let owner_id = self.owner_id("create associated resources of")?;
        if let Some(parent) = self.association.parent_property() {
            entity.insert(parent.to_string(), owner_id);
        }
        self.target.create(entity, options)
    }

    /// Iterates every associated resource, as `all(RequestOptions::new())`.
    ///
    /// If `all` fails, the iterator yields that error once and ends.
    #[must_use]
    pub fn iter(&self) -> ProxyIter {
        match self.all(RequestOptions::new()) {
            Ok(paginator) => ProxyIter::Pages(paginator),
            Err(error) => ProxyIter::Failed(Some(error)),
        }
    }
}

impl IntoIterator for &AssociationProxy {
    type Item = Result<Resource, ResourceError>;
    type IntoIter = ProxyIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator returned by [`AssociationProxy::iter`].
#[derive(Debug)]
pub enum ProxyIter {
    /// Paging through the associated resources.
    Pages(Paginator),
    /// The listing could not start; holds the error until it is yielded.
    Failed(Option<ResourceError>),
}

impl Iterator for ProxyIter {
    type Item = Result<Resource, ResourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Pages(paginator) => paginator.next(),
            Self::Failed(error) => error.take().map(Err),
        }
    }
}
