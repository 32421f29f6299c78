//! Per-type operations: list, retrieve, create, patch and delete.
//!
//! A [`ResourceType`] pairs a [`ResourceDefinition`] with the client that
//! sends its requests. Every operation is synchronous and blocks on the
//! transport. URLs are `root_url + base_path [+ id]`, joined by
//! [`build_url`].
//!
//! # Example
//!
//! ```rust,ignore
//! let articles = client.resource("BlogApi::Article")?;
//!
//! let mut entity = serde_json::Map::new();
//! entity.insert("title".into(), "Hello".into());
//! let article = articles.create(entity, RequestOptions::new())?;
//!
//! let same = articles.retrieve(article.id().unwrap(), RequestOptions::new())?;
//! articles.delete(1, RequestOptions::new().header("Authorization", "Bearer token"))?;
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::clients::{DataType, HttpRequest, HttpResponse};
use crate::error::ConfigError;
use crate::rest::client::RestClient;
use crate::rest::errors::ResourceError;
use crate::rest::options::RequestOptions;
use crate::rest::pagination::{Page, Paginator};
use crate::rest::path::{build_url, ResourceOperation};
use crate::rest::registry::ResourceDefinition;
use crate::rest::resource::Resource;

const JSON_CONTENT_TYPE: [(&str, &str); 1] = [("content-type", "application/json")];

/// Operations for one registered resource type.
#[derive(Clone)]
pub struct ResourceType {
    client: RestClient,
    definition: Arc<ResourceDefinition>,
}

impl fmt::Debug for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceType")
            .field("name", &self.definition.name())
            .field("base_path", &self.definition.base_path())
            .finish_non_exhaustive()
    }
}

impl ResourceType {
    pub(crate) const fn new(client: RestClient, definition: Arc<ResourceDefinition>) -> Self {
        Self { client, definition }
    }

    /// Returns the full type name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.definition.name()
    }

    /// Returns the type declaration.
    #[must_use]
    pub fn definition(&self) -> &ResourceDefinition {
        &self.definition
    }

    /// Returns the client this type sends requests through.
    #[must_use]
    pub const fn client(&self) -> &RestClient {
        &self.client
    }

    /// Builds an in-memory instance without any request.
    #[must_use]
    pub fn build(&self, data: Map<String, Value>) -> Resource {
        Resource::new(self.clone(), data)
    }

    /// Builds an empty, unsaved instance.
    #[must_use]
    pub fn new_resource(&self) -> Resource {
        self.build(Map::new())
    }

    /// Returns `root_url + base_path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRootUrl`] (wrapped) if no root URL resolves.
    pub fn collection_url(&self) -> Result<String, ResourceError> {
        let root = self
            .definition
            .root_url()
            .ok_or_else(|| ConfigError::MissingRootUrl {
                resource: self.name().to_string(),
            })?;
        Ok(build_url([root.as_ref(), self.definition.base_path()]))
    }

    /// Returns `root_url + base_path + "/" + id`, with the id percent-encoded
    /// so `a/b` stays one path segment (`a%2Fb`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRootUrl`] (wrapped) if no root URL resolves.
    pub fn member_url(&self, id: &str) -> Result<String, ResourceError> {
        let id = urlencoding::encode(id);
        Ok(build_url([self.collection_url()?.as_str(), id.as_ref()]))
    }

    /// Returns a lazy iterator over every instance, page by page.
    ///
    /// No request is sent until the iterator is advanced.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Config`] if no root URL resolves.
    pub fn list(&self, options: RequestOptions) -> Result<Paginator, ResourceError> {
        self.collection_url()?;
        Ok(Paginator::new(self.clone(), options))
    }

    /// Retrieves one instance by id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] on 404 and
    /// [`ResourceError::Transport`] for other failures.
    pub fn retrieve(
        &self,
        id: impl fmt::Display,
        options: RequestOptions,
    ) -> Result<Resource, ResourceError> {
        let id = id.to_string();
        let url = self.member_url(&id)?;
        let response = self.send(ResourceOperation::Retrieve, url, Some(&id), None, &options)?;
        self.decode_entity(response)
    }

    /// Creates an instance; the result carries server-assigned fields.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ValidationFailed`] on 400/422 and
    /// [`ResourceError::Transport`] for other failures.
    pub fn create(
        &self,
        entity: Map<String, Value>,
        options: RequestOptions,
    ) -> Result<Resource, ResourceError> {
        let url = self.collection_url()?;
        let response = self.send(
            ResourceOperation::Create,
            url,
            None,
            Some(Value::Object(entity)),
            &options,
        )?;
        self.decode_entity(response)
    }

    /// Applies a partial update; the result is the full updated instance.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] on 404,
    /// [`ResourceError::ValidationFailed`] on 400/422 and
    /// [`ResourceError::Transport`] for other failures.
    pub fn patch(
        &self,
        id: impl fmt::Display,
        diff: Map<String, Value>,
        options: RequestOptions,
    ) -> Result<Resource, ResourceError> {
        let id = id.to_string();
        let url = self.member_url(&id)?;
        let response = self.send(
            ResourceOperation::Patch,
            url,
            Some(&id),
            Some(Value::Object(diff)),
            &options,
        )?;
        self.decode_entity(response)
    }

    /// Deletes an instance by id. Any 2xx, including 204, is success.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] on 404 and
    /// [`ResourceError::Transport`] for other failures.
    pub fn delete(&self, id: impl fmt::Display, options: RequestOptions) -> Result<(), ResourceError> {
        let id = id.to_string();
        let url = self.member_url(&id)?;
        self.send(ResourceOperation::Delete, url, Some(&id), None, &options)?;
        Ok(())
    }

    /// Fetches one page of the collection with `page_param = page`.
    pub(crate) fn fetch_page(
        &self,
        page: u64,
        options: &RequestOptions,
    ) -> Result<Page, ResourceError> {
        let mut options = options.clone();
        options.set_param(self.definition.page_param(), page);

        let url = self.collection_url()?;
        let response = self.send(ResourceOperation::List, url, None, None, &options)?;

        serde_json::from_value(response.body).map_err(|e| ResourceError::Decode {
            resource: self.name().to_string(),
            message: format!("invalid page {page}: {e}"),
        })
    }

    fn send(
        &self,
        operation: ResourceOperation,
        url: String,
        id: Option<&str>,
        body: Option<Value>,
        options: &RequestOptions,
    ) -> Result<HttpResponse, ResourceError> {
        let client_headers: &[(&str, &str)] = if body.is_some() {
            &JSON_CONTENT_TYPE
        } else {
            &[]
        };

        let mut builder = HttpRequest::builder(operation.default_http_method(), url)
            .query(options.query())
            .headers(options.merged_headers(client_headers));
        if let Some(body) = body {
            builder = builder.body(body).body_type(DataType::Json);
        }
        let request = builder.build().map_err(crate::clients::HttpError::from)?;

        self.client
            .execute(request)
            .map_err(|e| ResourceError::from_http_error(e, self.name(), operation, id))
    }

    fn decode_entity(&self, response: HttpResponse) -> Result<Resource, ResourceError> {
        match response.body {
            Value::Object(data) => Ok(self.build(data)),
            other => Err(ResourceError::Decode {
                resource: self.name().to_string(),
                message: format!("expected a JSON object, got {other}"),
            }),
        }
    }
}
