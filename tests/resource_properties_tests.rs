//! Behavioral properties of resource operations, checked with `MockTransport`.
//!
//! Every test counts the requests that reach the transport, so these also
//! pin down when the client does and does not talk to the server.

use std::sync::Arc;

use pragma_client::clients::{HttpMethod, MockTransport};
use pragma_client::rest::build_url;
use pragma_client::{
    Registry, RequestOptions, ResourceConfig, ResourceDefinition, ResourceError, RestClient,
    RootUrl,
};
use serde_json::{json, Map, Value};

fn blog(base_path: &str) -> (Arc<MockTransport>, RestClient) {
    let root = RootUrl::new("http://localhost:5000/api/v1").unwrap();
    let registry = Registry::builder()
        .register(
            ResourceDefinition::new("BlogApi::Article")
                .config(
                    ResourceConfig::builder()
                        .root_url(root.clone())
                        .base_path(base_path)
                        .build()
                        .unwrap(),
                )
                .belongs_to("category"),
        )
        .register(
            ResourceDefinition::new("BlogApi::Category")
                .config(
                    ResourceConfig::builder()
                        .root_url(root)
                        .build()
                        .unwrap(),
                )
                .has_many("articles"),
        )
        .build()
        .unwrap();
    let mock = Arc::new(MockTransport::new());
    (Arc::clone(&mock), RestClient::new(mock, registry))
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected an object"),
    }
}

#[test]
fn test_save_without_id_issues_one_create() {
    let (mock, client) = blog("articles");
    mock.respond_json(201, json!({"id": 11, "title": "T"}));

    let mut article = client.resource("BlogApi::Article").unwrap().new_resource();
    article.set("title", "T");
    article.save(RequestOptions::new()).unwrap();

    assert_eq!(mock.request_count(), 1);
    assert_eq!(mock.last_request().unwrap().http_method, HttpMethod::Post);
    assert_eq!(article.id(), Some(&json!(11)));
}

#[test]
fn test_save_with_id_issues_one_patch() {
    let (mock, client) = blog("articles");
    mock.respond_json(200, json!({"id": 11, "title": "T"}));

    let mut article = client
        .resource("BlogApi::Article")
        .unwrap()
        .build(object(json!({"id": 11, "title": "T"})));
    article.save(RequestOptions::new()).unwrap();

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].http_method, HttpMethod::Patch);
    assert_eq!(requests[0].url, "http://localhost:5000/api/v1/articles/11");
}

#[test]
fn test_update_merges_diff_into_request_body() {
    let (mock, client) = blog("articles");
    mock.respond_json(200, json!({"id": 3, "title": "New", "body": "Text"}));

    let mut article = client
        .resource("BlogApi::Article")
        .unwrap()
        .build(object(json!({"id": 3, "title": "Old", "body": "Text"})));
    article
        .update(object(json!({"title": "New"})), RequestOptions::new())
        .unwrap();

    assert_eq!(
        mock.last_request().unwrap().body,
        Some(json!({"id": 3, "title": "New", "body": "Text"}))
    );
    assert_eq!(article.get("title"), Some(&json!("New")));
}

#[test]
fn test_list_yields_items_in_order_with_two_requests() {
    let (mock, client) = blog("articles");
    mock.respond_json(200, json!({"data": [{"id": "a"}, {"id": "b"}], "next_page": 2}));
    mock.respond_json(200, json!({"data": [{"id": "c"}], "next_page": null}));

    let ids: Vec<Value> = client
        .resource("BlogApi::Article")
        .unwrap()
        .list(RequestOptions::new())
        .unwrap()
        .map(|article| article.unwrap().into_map()["id"].clone())
        .collect();

    assert_eq!(ids, vec![json!("a"), json!("b"), json!("c")]);
    assert_eq!(mock.request_count(), 2);
    assert_eq!(mock.pending_responses(), 0);
}

#[test]
fn test_retrieve_twice_gives_identical_maps() {
    let (mock, client) = blog("articles");
    mock.respond_json(200, json!({"id": 1, "title": "Same", "tags": ["a", "b"]}));
    mock.respond_json(200, json!({"id": 1, "title": "Same", "tags": ["a", "b"]}));

    let articles = client.resource("BlogApi::Article").unwrap();
    let first = articles.retrieve(1, RequestOptions::new()).unwrap();
    let second = articles.retrieve(1, RequestOptions::new()).unwrap();

    assert_eq!(first.into_map(), second.into_map());
}

#[test]
fn test_embedded_belongs_to_sends_no_request() {
    let (mock, client) = blog("articles");
    let article = client
        .resource("BlogApi::Article")
        .unwrap()
        .build(object(json!({"category": {"id": 7, "name": "X"}})));

    let category = article.belongs_to("category").unwrap().unwrap();

    assert_eq!(category.id(), Some(&json!(7)));
    assert_eq!(mock.request_count(), 0);
}

#[test]
fn test_scalar_belongs_to_retrieves_once() {
    let (mock, client) = blog("articles");
    mock.respond_json(200, json!({"id": 7, "name": "X"}));
    let article = client
        .resource("BlogApi::Article")
        .unwrap()
        .build(object(json!({"category": 7})));

    let category = article.belongs_to("category").unwrap().unwrap();

    assert_eq!(category.get("name"), Some(&json!("X")));
    assert_eq!(mock.request_count(), 1);
    assert_eq!(
        mock.last_request().unwrap().url,
        "http://localhost:5000/api/v1/categories/7"
    );
}

#[test]
fn test_has_many_create_injects_owner_id() {
    let (mock, client) = blog("articles");
    mock.respond_json(201, json!({"id": 1, "title": "T", "category": 7}));
    let category = client
        .resource("BlogApi::Category")
        .unwrap()
        .build(object(json!({"id": 7})));

    category
        .has_many("articles")
        .unwrap()
        .create(object(json!({"title": "T"})), RequestOptions::new())
        .unwrap();

    let request = mock.last_request().unwrap();
    assert_eq!(request.http_method, HttpMethod::Post);
    assert_eq!(request.url, "http://localhost:5000/api/v1/articles");
    assert_eq!(request.body, Some(json!({"title": "T", "category": 7})));
}

#[test]
fn test_delete_then_reload_is_not_found() {
    let (mock, client) = blog("articles");
    mock.respond_status(204);
    mock.respond_json(404, json!({"error": "not found"}));

    let mut article = client
        .resource("BlogApi::Article")
        .unwrap()
        .build(object(json!({"id": 4, "title": "Bye"})));
    article.delete(RequestOptions::new()).unwrap();

    assert!(article.is_persisted());
    assert!(matches!(
        article.reload(RequestOptions::new()),
        Err(ResourceError::NotFound { .. })
    ));
    assert_eq!(mock.request_count(), 2);
}

#[test]
fn test_base_path_separators_never_double_or_vanish() {
    for base_path in ["articles", "/articles", "articles/", "/articles/", "//articles//"] {
        let (mock, client) = blog(base_path);
        mock.respond_json(200, json!({"id": 1}));

        client
            .resource("BlogApi::Article")
            .unwrap()
            .retrieve(1, RequestOptions::new())
            .unwrap();

        assert_eq!(
            mock.last_request().unwrap().url,
            "http://localhost:5000/api/v1/articles/1",
            "base path {base_path:?}"
        );
    }

    assert_eq!(
        build_url(["http://host/api/", "/v1/", "items", "/5"]),
        "http://host/api/v1/items/5"
    );
}

#[test]
fn test_unregistered_association_target_fails_on_access() {
    let registry = Registry::builder()
        .register(
            ResourceDefinition::new("BlogApi::Article")
                .config(
                    ResourceConfig::builder()
                        .root_url(RootUrl::new("http://localhost:5000").unwrap())
                        .build()
                        .unwrap(),
                )
                .belongs_to("author"),
        )
        .build()
        .unwrap();
    let mock = Arc::new(MockTransport::new());
    let client = RestClient::new(Arc::clone(&mock), registry);
    let article = client
        .resource("BlogApi::Article")
        .unwrap()
        .build(object(json!({"author": 3})));

    let error = article.belongs_to("author").unwrap_err();

    assert!(matches!(
        &error,
        ResourceError::UnresolvedAssociation { association, expected }
            if association == "BlogApi::Article.author" && expected == "BlogApi::Author"
    ));
    assert_eq!(mock.request_count(), 0);
}
