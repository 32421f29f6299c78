//! End-to-end tests of a small blog API over HTTP.
//!
//! `Category` has many `articles`; `Article` belongs to a `category`. The
//! resource client runs inside `spawn_blocking` against a `wiremock` server,
//! and only plain property maps leave the blocking closure so the blocking
//! HTTP client is never dropped on a runtime thread.

use pragma_client::clients::HttpClient;
use pragma_client::rest::AssociationKind;
use pragma_client::{
    Registry, RequestOptions, ResourceConfig, ResourceDefinition, ResourceError, RestClient,
    RootUrl,
};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn run_blocking<T, F>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.unwrap()
}

fn blog_client(server_uri: &str) -> RestClient {
    let api = Arc::new(
        ResourceConfig::builder()
            .root_url(RootUrl::new(format!("{server_uri}/api/v1")).unwrap())
            .build()
            .unwrap(),
    );
    let registry = Registry::builder()
        .register(
            ResourceDefinition::new("BlogApi::Category")
                .config(
                    ResourceConfig::builder()
                        .based_on(Arc::clone(&api))
                        .build()
                        .unwrap(),
                )
                .has_many("articles"),
        )
        .register(
            ResourceDefinition::new("BlogApi::Article")
                .config(
                    ResourceConfig::builder()
                        .based_on(api)
                        .base_path("/articles/")
                        .build()
                        .unwrap(),
                )
                .belongs_to("category"),
        )
        .build()
        .unwrap();

    let transport = HttpClient::builder()
        .user_agent_prefix("BlogApp/1.0")
        .build()
        .unwrap();
    RestClient::new(transport, registry)
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected an object"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_walks_every_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/articles"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 1, "title": "One"}, {"id": 2, "title": "Two"}],
            "next_page": 2
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/articles"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 3, "title": "Three"}],
            "next_page": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let titles = run_blocking(move || {
        let client = blog_client(&uri);
        client
            .resource("BlogApi::Article")
            .unwrap()
            .list(RequestOptions::new())
            .unwrap()
            .map(|article| article.unwrap().get_as::<String>("title").unwrap().unwrap())
            .collect::<Vec<_>>()
    })
    .await;

    assert_eq!(titles, vec!["One", "Two", "Three"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_sends_array_and_object_params_with_brackets() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/articles"))
        .and(query_param("tags[]", "a"))
        .and(query_param("tags[]", "b"))
        .and(query_param("filter[x]", "1"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 1, "title": "Tagged"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let count = run_blocking(move || {
        let client = blog_client(&uri);
        client
            .resource("BlogApi::Article")
            .unwrap()
            .list(
                RequestOptions::new()
                    .param("tags", json!(["a", "b"]))
                    .param("filter", json!({"x": 1})),
            )
            .unwrap()
            .map(Result::unwrap)
            .count()
    })
    .await;

    assert_eq!(count, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_retrieve_escapes_ids_in_the_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/articles/a%2Fb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "a/b"})))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let data = run_blocking(move || {
        let client = blog_client(&uri);
        client
            .resource("BlogApi::Article")
            .unwrap()
            .retrieve("a/b", RequestOptions::new())
            .unwrap()
            .into_map()
    })
    .await;

    assert_eq!(data.get("id"), Some(&json!("a/b")));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_update_and_delete_article() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/articles"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"title": "Draft"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 5, "title": "Draft"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/articles/5"))
        .and(body_json(json!({"id": 5, "title": "Published"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 5, "title": "Published", "published": true})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/articles/5"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let article = run_blocking(move || {
        let client = blog_client(&uri);
        let articles = client.resource("BlogApi::Article").unwrap();

        let mut article = articles.new_resource();
        article.set("title", "Draft");
        article.save(RequestOptions::new()).unwrap();
        assert_eq!(article.id(), Some(&json!(5)));

        article
            .update(object(json!({"title": "Published"})), RequestOptions::new())
            .unwrap();
        article.delete(RequestOptions::new()).unwrap();
        article.into_map()
    })
    .await;

    assert_eq!(article.get("published"), Some(&json!(true)));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_reload_after_delete_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/articles/5"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "not found"})))
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = run_blocking(move || {
        let client = blog_client(&uri);
        let mut article = client
            .resource("BlogApi::Article")
            .unwrap()
            .build(object(json!({"id": 5, "title": "Gone"})));
        article.reload(RequestOptions::new())
    })
    .await;

    assert!(matches!(
        result,
        Err(ResourceError::NotFound { ref resource, ref id })
            if resource == "BlogApi::Article" && id == "5"
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_validation_errors_are_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/articles"))
        .respond_with(
            ResponseTemplate::new(422)
                .insert_header("x-request-id", "req-7")
                .set_body_json(json!({"errors": {"title": ["must be filled"]}})),
        )
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = run_blocking(move || {
        let client = blog_client(&uri);
        client
            .resource("BlogApi::Article")
            .unwrap()
            .create(Map::new(), RequestOptions::new())
            .map(pragma_client::Resource::into_map)
    })
    .await;

    match result {
        Err(error @ ResourceError::ValidationFailed { .. }) => {
            assert_eq!(error.request_id(), Some("req-7"));
            if let ResourceError::ValidationFailed { errors, .. } = error {
                assert_eq!(errors["title"], vec!["must be filled".to_string()]);
            }
        }
        other => panic!("expected a validation error, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_category_articles_filter_and_create() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/categories/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7, "name": "Rust"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/articles"))
        .and(query_param("by_category", "7"))
        .and(query_param("page", "1"))
        .and(query_param("published", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 1, "title": "Ownership", "category": 7}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/articles"))
        .and(body_json(json!({"title": "Borrowing", "category": 7})))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"id": 2, "title": "Borrowing", "category": 7})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let (listed, created) = run_blocking(move || {
        let client = blog_client(&uri);
        let category = client
            .resource("BlogApi::Category")
            .unwrap()
            .retrieve(7, RequestOptions::new())
            .unwrap();

        let articles = category.has_many("articles").unwrap();
        assert_eq!(articles.association().kind(), AssociationKind::HasMany);

        let listed: Vec<_> = articles
            .all(RequestOptions::new().param("published", true))
            .unwrap()
            .map(|article| article.unwrap().into_map())
            .collect();
        let created = articles
            .create(object(json!({"title": "Borrowing"})), RequestOptions::new())
            .unwrap();
        (listed, created.into_map())
    })
    .await;

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].get("title"), Some(&json!("Ownership")));
    assert_eq!(created.get("id"), Some(&json!(2)));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_article_category_by_id_and_embedded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/categories/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7, "name": "Rust"})))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let (fetched, embedded) = run_blocking(move || {
        let client = blog_client(&uri);
        let articles = client.resource("BlogApi::Article").unwrap();

        let by_id = articles.build(object(json!({"id": 1, "category": 7})));
        let fetched = by_id.belongs_to("category").unwrap().unwrap();

        let with_embedded =
            articles.build(object(json!({"id": 2, "category": {"id": 8, "name": "Go"}})));
        let embedded = with_embedded.belongs_to("category").unwrap().unwrap();
        (fetched.into_map(), embedded.into_map())
    })
    .await;

    assert_eq!(fetched.get("name"), Some(&json!("Rust")));
    assert_eq!(embedded.get("name"), Some(&json!("Go")));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}
