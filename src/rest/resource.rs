//! A single resource instance.
//!
//! A [`Resource`] wraps an ordered property map. The map is the only state:
//! `id` is present iff the instance is persisted, and `save`, `update` and
//! `reload` replace the whole map with the server's representation.
//!
//! # Example
//!
//! ```rust,ignore
//! let articles = client.resource("BlogApi::Article")?;
//!
//! let mut article = articles.new_resource();
//! article.set("title", "Hello");
//! article.save(RequestOptions::new())?;
//! assert!(article.is_persisted());
//!
//! let mut diff = serde_json::Map::new();
//! diff.insert("title".into(), "Hello, world".into());
//! article.update(diff, RequestOptions::new())?;
//!
//! let category = article.belongs_to("category")?;
//! ```

use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::rest::association::{Associated, Association, AssociationKind, AssociationProxy};
use crate::rest::errors::ResourceError;
use crate::rest::options::RequestOptions;
use crate::rest::resource_type::ResourceType;

const ID_KEY: &str = "id";

/// One entity of a resource type.
#[derive(Clone, Debug)]
pub struct Resource {
    resource_type: ResourceType,
    data: Map<String, Value>,
}

impl Resource {
    pub(crate) const fn new(resource_type: ResourceType, data: Map<String, Value>) -> Self {
        Self {
            resource_type,
            data,
        }
    }

    /// Returns the type this instance belongs to.
    #[must_use]
    pub const fn resource_type(&self) -> &ResourceType {
        &self.resource_type
    }

    /// Returns a property value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Sets a property, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.data.insert(key.into(), value.into())
    }

    /// Deserializes a property into `T`.
    ///
    /// Returns `Ok(None)` when the property is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Decode`] if the value does not fit `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ResourceError> {
        self.data
            .get(key)
            .map(|value| {
                T::deserialize(value).map_err(|e| ResourceError::Decode {
                    resource: self.resource_type.name().to_string(),
                    message: format!("property {key}: {e}"),
                })
            })
            .transpose()
    }

    /// Deserializes the whole property map into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Decode`] if the map does not fit `T`.
    pub fn to_typed<T: DeserializeOwned>(&self) -> Result<T, ResourceError> {
        T::deserialize(&Value::Object(self.data.clone())).map_err(|e| ResourceError::Decode {
            resource: self.resource_type.name().to_string(),
            message: e.to_string(),
        })
    }

    /// Returns the `id` property unless it is absent or null.
    #[must_use]
    pub fn id(&self) -> Option<&Value> {
        self.data.get(ID_KEY).filter(|id| !id.is_null())
    }

    /// Returns `true` if the instance carries an id.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.id().is_some()
    }

    /// Returns the property map.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Consumes the instance, returning its property map.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.data
    }

    fn require_id(&self, operation: &'static str) -> Result<String, ResourceError> {
        self.id()
            .and_then(crate::rest::path::id_fragment)
            .ok_or_else(|| ResourceError::MissingId {
                resource: self.resource_type.name().to_string(),
                operation,
            })
    }

    /// Deletes the instance on the server.
    ///
    /// The local map is left untouched; a later `reload` reports
    /// [`ResourceError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if the instance has no id, or any
    /// error from [`ResourceType::delete`].
    pub fn delete(&self, options: RequestOptions) -> Result<(), ResourceError> {
        let id = self.require_id("delete")?;
        self.resource_type.delete(id, options)
    }

    /// Replaces the property map with the server's current representation.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if the instance has no id, or any
    /// error from [`ResourceType::retrieve`].
    pub fn reload(&mut self, options: RequestOptions) -> Result<(), ResourceError> {
        let id = self.require_id("reload")?;
        let fresh = self.resource_type.retrieve(id, options)?;
        self.data = fresh.data;
        Ok(())
    }

    /// Persists the instance: patch when it has an id, create when the id is
    /// absent or null.
    ///
    /// The whole property map is sent, and replaced by the response.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] without sending anything if the id
    /// is present but unusable (an empty string, a boolean, an array or an
    /// object). Otherwise returns any error from [`ResourceType::patch`] or
    /// [`ResourceType::create`]. The local map is unchanged on failure.
    pub fn save(&mut self, options: RequestOptions) -> Result<(), ResourceError> {
        let saved = if self.is_persisted() {
            let id = self.require_id("save")?;
            self.resource_type.patch(id, self.data.clone(), options)?
        } else {
            self.resource_type.create(self.data.clone(), options)?
        };
        self.data = saved.data;
        Ok(())
    }

    /// Shallow-merges `diff` into the property map, then calls [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// Returns any error from `save`. The merge stays applied on failure.
    pub fn update(
        &mut self,
        diff: Map<String, Value>,
        options: RequestOptions,
    ) -> Result<(), ResourceError> {
        self.data.extend(diff);
        self.save(options)
    }

    fn declared_association(&self, property: &str) -> Result<&Association, ResourceError> {
        self.resource_type
            .definition()
            .association(property)
            .ok_or_else(|| ResourceError::UnknownAssociation {
                resource: self.resource_type.name().to_string(),
                property: property.to_string(),
            })
    }

    /// Resolves a declared association of either kind.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownAssociation`] if `property` is not
    /// declared, or any error from [`Association::load`].
    pub fn association(&self, property: &str) -> Result<Associated, ResourceError> {
        self.declared_association(property)?.load(self)
    }

    /// Resolves a `belongs_to` association.
    ///
    /// An embedded object is built without a request; a scalar id is
    /// retrieved; a null or absent property resolves to `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::WrongAssociationKind`] if `property` is a
    /// `has_many`, plus the errors of [`association`](Self::association).
    pub fn belongs_to(&self, property: &str) -> Result<Option<Resource>, ResourceError> {
        let association = self.declared_association(property)?;
        if association.kind() != AssociationKind::BelongsTo {
            return Err(wrong_kind(association));
        }
        match association.load(self)? {
            Associated::One(resource) => Ok(resource),
            Associated::Many(_) => Err(wrong_kind(association)),
        }
    }

    /// Returns the proxy for a `has_many` association.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::WrongAssociationKind`] if `property` is a
    /// `belongs_to`, plus the errors of [`association`](Self::association).
    pub fn has_many(&self, property: &str) -> Result<AssociationProxy, ResourceError> {
        let association = self.declared_association(property)?;
        if association.kind() != AssociationKind::HasMany {
            return Err(wrong_kind(association));
        }
        match association.load(self)? {
            Associated::Many(proxy) => Ok(proxy),
            Associated::One(_) => Err(wrong_kind(association)),
        }
    }
}

fn wrong_kind(association: &Association) -> ResourceError {
    ResourceError::WrongAssociationKind {
        association: association.association_name(),
        kind: association.kind().as_str(),
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.data.serialize(serializer)
    }
}
