//! Integration tests for `HyperTransport` traversal using wiremock.

use assert2::let_assert;
use serde::{Deserialize, Serialize};
use serde_json::json;
use wayfarer::{Error, HyperTransport, Resource};
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HAL: &str = "application/hal+json";

fn hal_body(document: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(document.to_string(), HAL)
}

async fn transport(server: &MockServer) -> HyperTransport {
    HyperTransport::new(server.uri()).expect("transport")
}

fn root_document(server: &MockServer) -> serde_json::Value {
    // Mixes absolute and relative hrefs; both must resolve.
    json!({
        "_links": {
            "self": {"href": format!("{}/", server.uri()), "method": "GET"},
            "orders": {"href": "/orders", "method": "GET"},
            "orders-doc": {"href": "/docs/orders", "method": "GET"},
            "search": {"href": "/search?page=1", "method": "GET"},
            "create": {"href": "/orders", "method": "POST"},
            "upload": {"href": "/upload", "method": "POST"},
            "report": {"href": "/report.pdf", "method": "GET"},
        },
        "_embedded": {
            "items": [
                {"sku": "a", "_links": {"self": {"href": "/items/a"}}},
                {"sku": "b"},
            ],
        },
        "name": "storefront",
    })
}

#[tokio::test]
async fn root_strips_envelope_and_resolves_links() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("Accept", HAL))
        .respond_with(hal_body(root_document(&server)))
        .mount(&server)
        .await;

    let api = transport(&server).await;
    let root = api.root().await.expect("root");

    let data = root.data();
    assert_eq!(data.get("name"), Some(&json!("storefront")));
    assert_eq!(data.get("_links"), None);
    assert_eq!(data.get("_embedded"), None);

    assert!(root.has_link("orders"));
    assert!(root.has_doc("orders"));
    assert!(!root.has_link("missing"));
    assert_eq!(root.links().len(), 7);
}

#[tokio::test]
async fn follow_navigates_to_linked_resource() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(hal_body(root_document(&server)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .and(header("Accept", HAL))
        .respond_with(hal_body(json!({"count": 3})))
        .mount(&server)
        .await;

    let api = transport(&server).await;
    let orders = api.root().await.expect("root").follow("orders").await.expect("orders");

    assert_eq!(orders.data().get("count"), Some(&json!(3)));
}

#[tokio::test]
async fn follow_unknown_relation_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(hal_body(root_document(&server)))
        .mount(&server)
        .await;

    let api = transport(&server).await;
    let root = api.root().await.expect("root");

    let err = root.follow("missing").await.expect_err("should fail");
    let_assert!(Error::UnknownRelation { rel } = err);
    assert_eq!(rel, "missing");
}

#[tokio::test]
async fn follow_with_query_replaces_the_link_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(hal_body(root_document(&server)))
        .mount(&server)
        .await;
    // The link href carries ?page=1; composition must drop it entirely.
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("state", "open"))
        .and(query_param_is_missing("page"))
        .respond_with(hal_body(json!({"results": []})))
        .mount(&server)
        .await;

    let api = transport(&server).await;
    let root = api.root().await.expect("root");

    let results = root
        .follow_with_query("search", &json!({"state": "open"}))
        .await
        .expect("search");
    assert_eq!(results.data().get("results"), Some(&json!([])));
}

#[tokio::test]
async fn follow_with_body_posts_json() {
    let server = MockServer::start().await;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct NewOrder {
        reference: String,
    }

    let new_order = NewOrder {
        reference: "A-42".to_string(),
    };

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(hal_body(root_document(&server)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/orders"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(&new_order))
        .respond_with(hal_body(json!({"reference": "A-42", "state": "open"})))
        .mount(&server)
        .await;

    let api = transport(&server).await;
    let root = api.root().await.expect("root");

    let created = root
        .follow_with_body("create", &new_order)
        .await
        .expect("create");
    assert_eq!(created.data().get("state"), Some(&json!("open")));
}

#[tokio::test]
async fn follow_with_form_posts_flattened_multipart() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(hal_body(root_document(&server)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(hal_body(json!({"ok": true})))
        .mount(&server)
        .await;

    let api = transport(&server).await;
    let root = api.root().await.expect("root");

    root.follow_with_form("upload", &json!({"meta": {"kind": "avatar"}, "ids": [1, 2]}))
        .await
        .expect("upload");

    let requests = server.received_requests().await.expect("requests");
    let upload = requests
        .iter()
        .find(|request| request.url.path() == "/upload")
        .expect("upload request");

    let content_type = upload
        .headers
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .expect("content type");
    assert!(content_type.starts_with("multipart/form-data; boundary="));

    let body = String::from_utf8_lossy(&upload.body);
    assert!(body.contains("name=\"meta.kind\""));
    assert!(body.contains("avatar\r\n"));
    assert!(body.contains("name=\"ids\""));
    assert!(body.contains("[1,2]\r\n"));
}

#[tokio::test]
async fn follow_doc_fetches_the_documentation_link() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(hal_body(root_document(&server)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/docs/orders"))
        .respond_with(hal_body(json!({"title": "Orders"})))
        .mount(&server)
        .await;

    let api = transport(&server).await;
    let root = api.root().await.expect("root");

    let doc = root.follow_doc("orders").await.expect("doc");
    assert_eq!(doc.data().get("title"), Some(&json!("Orders")));
}

#[tokio::test]
async fn follow_raw_returns_the_unparsed_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(hal_body(root_document(&server)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/report.pdf"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(b"%PDF-1.7".to_vec(), "application/pdf"),
        )
        .mount(&server)
        .await;

    let api = transport(&server).await;
    let root = api.root().await.expect("root");

    let response = root.follow_raw("report").await.expect("raw");
    assert_eq!(response.status(), 200);
    assert_eq!(response.header("content-type"), Some("application/pdf"));
    assert_eq!(response.body().as_ref(), b"%PDF-1.7");
}

#[tokio::test]
async fn embedded_resources_navigate_further() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(hal_body(root_document(&server)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/items/a"))
        .respond_with(hal_body(json!({"sku": "a", "stock": 12})))
        .mount(&server)
        .await;

    let api = transport(&server).await;
    let root = api.root().await.expect("root");

    let items = root.embed("items");
    assert_eq!(items.len(), 2);

    let resources = items.resources().expect("resources");
    let first = resources.first().expect("first item");
    assert_eq!(first.data().get("sku"), Some(&json!("a")));

    let detail = first.follow("self").await.expect("detail");
    assert_eq!(detail.data().get("stock"), Some(&json!(12)));
}

#[tokio::test]
async fn structured_server_error_is_classified() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(400).set_body_raw(
            json!({"message": "bad", "errors": {"name": "required"}}).to_string(),
            "application/json",
        ))
        .mount(&server)
        .await;

    let api = transport(&server).await;
    let err = api.root().await.expect_err("should fail");

    let server_error = err.as_server().expect("structured error");
    assert_eq!(server_error.status(), 400);
    assert_eq!(server_error.message(), "bad");
    assert!(server_error.has_validation_error("name"));
    assert_eq!(server_error.validation_error("name"), Some("required"));
    assert_eq!(server_error.validation_error("missing"), None);
}

#[tokio::test]
async fn failure_without_structured_body_is_generic() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let api = transport(&server).await;
    let err = api.root().await.expect_err("should fail");

    assert!(matches!(err, Error::Http { status: 500, .. }), "{err}");
    assert!(err.is_server_error());
    assert!(err.as_server().is_none());
}

#[tokio::test]
async fn successful_response_with_wrong_content_type_is_rejected() {
    let server = MockServer::start().await;

    // Valid JSON, but text/plain: still a fatal unsupported content type.
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"ok":true}"#, "text/plain"))
        .mount(&server)
        .await;

    let api = transport(&server).await;
    let err = api.root().await.expect_err("should fail");

    assert!(matches!(err, Error::UnsupportedContentType { .. }), "{err}");
}

#[tokio::test]
async fn generic_json_success_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"ok":true}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let api = transport(&server).await;
    let err = api.root().await.expect_err("should fail");

    assert!(matches!(err, Error::UnsupportedContentType { .. }), "{err}");
}

#[tokio::test]
async fn success_without_content_type_yields_an_empty_resource() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let api = transport(&server).await;
    let root = api.root().await.expect("root");

    assert_eq!(root.data(), &serde_json::Value::Null);
    assert!(root.links().is_empty());
    assert!(root.embeds().is_empty());
}

#[tokio::test]
async fn typed_payload_deserialization() {
    let server = MockServer::start().await;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Store {
        name: String,
    }

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(hal_body(root_document(&server)))
        .mount(&server)
        .await;

    let api = transport(&server).await;
    let root = api.root().await.expect("root");

    let store: Store = root.data_as().expect("typed");
    assert_eq!(
        store,
        Store {
            name: "storefront".to_string()
        }
    );
}

#[tokio::test]
async fn load_fetches_an_arbitrary_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orders/7"))
        .respond_with(hal_body(json!({"reference": "A-7"})))
        .mount(&server)
        .await;

    let api = transport(&server).await;
    let order = Resource::load(api, "/orders/7").await.expect("order");
    assert_eq!(order.data().get("reference"), Some(&json!("A-7")));
}

#[tokio::test]
async fn timeout_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(hal_body(json!({})).set_delay(std::time::Duration::from_secs(5)))
        .mount(&server)
        .await;

    let api = HyperTransport::builder(server.uri())
        .timeout(std::time::Duration::from_millis(100))
        .build()
        .expect("transport");

    let err = api.root().await.expect_err("should time out");
    assert!(err.is_timeout(), "Expected timeout error, got: {err}");
}

#[tokio::test]
async fn connection_error_is_reported() {
    let api = HyperTransport::new("http://127.0.0.1:1").expect("transport");

    let err = api.root().await.expect_err("should fail");
    assert!(err.is_connection(), "Expected connection error, got: {err}");
}
