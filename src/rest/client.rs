//! The entry point tying a transport to a registry of resource types.

use std::sync::Arc;

use crate::clients::{HttpClient, HttpError, HttpRequest, HttpResponse, Transport};
use crate::rest::errors::ResourceError;
use crate::rest::registry::Registry;
use crate::rest::resource_type::ResourceType;

#[derive(Debug)]
struct ClientInner {
    transport: Box<dyn Transport>,
    registry: Registry,
}

/// Client for resource APIs.
///
/// Holds the [`Transport`] used for every request and the [`Registry`] of
/// declared resource types. Cloning is cheap; clones share both.
///
/// # Thread Safety
///
/// `RestClient` is `Send + Sync`.
///
/// # Example
///
/// ```rust,no_run
/// use pragma_client::{ResourceConfig, RootUrl};
/// use pragma_client::rest::{Registry, RequestOptions, ResourceDefinition, RestClient};
///
/// let config = ResourceConfig::builder()
///     .root_url(RootUrl::new("http://localhost:5000/api/v1").unwrap())
///     .build()
///     .unwrap();
///
/// let registry = Registry::builder()
///     .register(ResourceDefinition::new("BlogApi::Article").config(config))
///     .build()
///     .unwrap();
///
/// let client = RestClient::with_http_client(registry).unwrap();
/// let articles = client.resource("BlogApi::Article").unwrap();
///
/// for article in articles.list(RequestOptions::new()).unwrap() {
///     println!("{:?}", article.unwrap().get("title"));
/// }
/// ```
#[derive(Clone, Debug)]
pub struct RestClient {
    inner: Arc<ClientInner>,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a client sending requests through `transport`.
    #[must_use]
    pub fn new(transport: impl Transport + 'static, registry: Registry) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                transport: Box::new(transport),
                registry,
            }),
        }
    }

    /// Creates a client backed by a default [`HttpClient`].
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be created.
    pub fn with_http_client(registry: Registry) -> Result<Self, HttpError> {
        Ok(Self::new(HttpClient::builder().build()?, registry))
    }

    /// Returns the registry of declared resource types.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    /// Returns the operations handle for a registered resource type.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownResource`] if `name` is not registered.
    pub fn resource(&self, name: &str) -> Result<ResourceType, ResourceError> {
        let definition = self
            .inner
            .registry
            .get(name)
            .ok_or_else(|| ResourceError::UnknownResource {
                name: name.to_string(),
            })?;
        Ok(ResourceType::new(self.clone(), Arc::clone(definition)))
    }

    pub(crate) fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.inner.transport.execute(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::MockTransport;
    use crate::rest::registry::ResourceDefinition;

    #[test]
    fn test_resource_lookup() {
        let registry = Registry::builder()
            .register(ResourceDefinition::new("BlogApi::Article"))
            .build()
            .unwrap();
        let client = RestClient::new(MockTransport::new(), registry);

        assert_eq!(
            client.resource("BlogApi::Article").unwrap().name(),
            "BlogApi::Article"
        );
        assert!(matches!(
            client.resource("BlogApi::Comment"),
            Err(ResourceError::UnknownResource { name }) if name == "BlogApi::Comment"
        ));
    }

    #[test]
    fn test_clones_share_registry() {
        let registry = Registry::builder()
            .register(ResourceDefinition::new("BlogApi::Article"))
            .build()
            .unwrap();
        let client = RestClient::new(MockTransport::new(), registry);
        let clone = client.clone();

        assert!(std::ptr::eq(client.registry(), clone.registry()));
    }
}
