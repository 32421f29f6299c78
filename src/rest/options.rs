//! Per-call query parameters and headers.
//!
//! Every resource operation takes a [`RequestOptions`] carrying caller
//! params and headers. Params always travel as the query string and are never
//! merged into headers.

use std::collections::HashMap;

use serde_json::{Map, Value};

/// Header sent with every request unless the caller overrides it.
pub const DEFAULT_ACCEPT: &str = "application/json";

/// Caller-supplied query parameters and headers for one operation.
///
/// # Example
///
/// ```rust
/// use pragma_client::rest::RequestOptions;
///
/// let options = RequestOptions::new()
///     .param("by_category", 7)
///     .param("tags", vec!["rust", "http"])
///     .header("Authorization", "Bearer token");
///
/// let raw_query = options.query();
/// let query: Vec<(&str, &str)> = raw_query
///     .iter()
///     .map(|(k, v)| (k.as_str(), v.as_str()))
///     .collect();
/// assert_eq!(
///     query,
///     [("by_category", "7"), ("tags[]", "rust"), ("tags[]", "http")]
/// );
/// assert_eq!(options.headers().get("authorization").map(String::as_str), Some("Bearer token"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestOptions {
    params: Map<String, Value>,
    headers: HashMap<String, String>,
}

impl RequestOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a query parameter, replacing any previous value.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Sets a header, replacing any previous value. Names are case-insensitive.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(key.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Returns the raw parameters.
    #[must_use]
    pub const fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    /// Returns the headers, keyed by lowercase name.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Inserts a parameter in place; used to inject pagination and filters.
    pub(crate) fn set_param(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.params.insert(key.into(), value.into());
    }

    /// Flattens the parameters into ordered query string pairs.
    ///
    /// Nested values use bracket keys: `tags: ["a", "b"]` becomes
    /// `tags[]=a&tags[]=b` and `filter: {"x": 1}` becomes `filter[x]=1`.
    /// Scalars are rendered as strings, numbers and booleans. Nulls are
    /// skipped.
    #[must_use]
    pub fn query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        for (key, value) in &self.params {
            flatten_param(key.clone(), value, &mut query);
        }
        query
    }

    /// Builds the request headers for an operation.
    ///
    /// Precedence, lowest to highest: `accept: application/json`, the
    /// operation's own headers, the caller's headers.
    #[must_use]
    pub fn merged_headers(&self, client_headers: &[(&str, &str)]) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert("accept".to_string(), DEFAULT_ACCEPT.to_string());
        for (key, value) in client_headers {
            headers.insert(key.to_ascii_lowercase(), (*value).to_string());
        }
        for (key, value) in &self.headers {
            headers.insert(key.clone(), value.clone());
        }
        headers
    }
}

fn flatten_param(key: String, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::String(s) => out.push((key, s.clone())),
        Value::Number(n) => out.push((key, n.to_string())),
        Value::Bool(b) => out.push((key, b.to_string())),
        Value::Array(items) => {
            for item in items {
                flatten_param(format!("{key}[]"), item, out);
            }
        }
        Value::Object(fields) => {
            for (field, item) in fields {
                flatten_param(format!("{key}[{field}]"), item, out);
            }
        }
    }
}
