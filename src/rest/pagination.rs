//! Lazy, page-by-page iteration over a collection.
//!
//! [`ResourceType::list`](crate::rest::ResourceType::list) returns a
//! [`Paginator`]. It fetches page 1 on the first call to `next`, yields that
//! page's items, and only then requests the page named by `next_page`. The
//! sequence ends when a page carries no `next_page`.
//!
//! # Wire Format
//!
//! ```json
//! { "data": [ { "id": 1 }, { "id": 2 } ], "next_page": 2 }
//! ```

use std::collections::VecDeque;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::rest::errors::ResourceError;
use crate::rest::options::RequestOptions;
use crate::rest::resource::Resource;
use crate::rest::resource_type::ResourceType;

/// One page of a list response.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Page {
    /// The entities on this page.
    pub data: Vec<Map<String, Value>>,
    /// The next page number; absent or `null` on the last page.
    #[serde(default)]
    pub next_page: Option<u64>,
}

/// Lazy iterator over every instance of a resource type.
///
/// Each item is a `Result`: a failed page fetch yields one `Err`, after
/// which the iterator is exhausted. Items already yielded stay valid. The
/// iterator cannot be restarted; call `list` again for a fresh one.
///
/// # Example
///
/// ```rust,ignore
/// let titles: Vec<String> = articles
///     .list(RequestOptions::new())?
///     .per_page(50)
///     .map(|article| article.map(|a| a.get_as::<String>("title")))
///     .collect::<Result<_, _>>()?;
/// ```
#[derive(Debug)]
pub struct Paginator {
    resource_type: ResourceType,
    options: RequestOptions,
    buffer: VecDeque<Map<String, Value>>,
    next_page: Option<u64>,
    current_page: Option<u64>,
}

impl Paginator {
    pub(crate) const fn new(resource_type: ResourceType, options: RequestOptions) -> Self {
        Self {
            resource_type,
            options,
            buffer: VecDeque::new(),
            next_page: Some(1),
            current_page: None,
        }
    }

    /// Requests `per_page` items per page through the type's `per_page_param`.
    #[must_use]
    pub fn per_page(mut self, per_page: u64) -> Self {
        let param = self.resource_type.definition().per_page_param().to_string();
        self.options.set_param(param, per_page);
        self
    }

    /// Returns `true` if buffered items remain or another page can be fetched.
    #[must_use]
    pub fn has_more(&self) -> bool {
        !self.buffer.is_empty() || self.next_page.is_some()
    }

    /// Returns the number of the last page fetched, if any.
    #[must_use]
    pub const fn current_page(&self) -> Option<u64> {
        self.current_page
    }

    /// Returns the resource type being listed.
    #[must_use]
    pub const fn resource_type(&self) -> &ResourceType {
        &self.resource_type
    }
}

impl Iterator for Paginator {
    type Item = Result<Resource, ResourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(data) = self.buffer.pop_front() {
                return Some(Ok(self.resource_type.build(data)));
            }

            let page = self.next_page.take()?;
            tracing::debug!(resource = %self.resource_type.name(), page, "Fetching page");

            match self.resource_type.fetch_page(page, &self.options) {
                Ok(fetched) => {
                    self.current_page = Some(page);
                    self.buffer.extend(fetched.data);
                    self.next_page = fetched.next_page;
                }
                Err(error) => return Some(Err(error)),
            }
        }
    }
}
