use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use content_api::{app, AppState, MemoryStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

fn test_app() -> Router {
    app(AppState::new(Arc::new(MemoryStore::new())))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = match body {
        Some(v) => Body::from(v.to_string()),
        None => Body::empty(),
    };
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();
    send_request(app, req).await
}

async fn send_request(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn create(app: &Router, resource: &str, body: Value) -> Value {
    let (status, json) = send(app, Method::POST, &format!("/api/{}", resource), Some(body)).await;
    assert_eq!(status, StatusCode::OK, "{json}");
    json
}

fn id_of(json: &Value) -> String {
    json["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn create_page_example() {
    let app = test_app();
    let (status, json) = send(
        &app,
        Method::POST,
        "/api/pages",
        Some(json!({ "title": "My New Page", "content": "x", "site_id": "s1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["title"], "My New Page");
    assert_eq!(json["status"], "draft");
    assert!(!id_of(&json).is_empty());

    let (status, json) = send(
        &app,
        Method::POST,
        "/api/pages",
        Some(json!({ "content": "x", "site_id": "s1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Title is required");
}

#[tokio::test]
async fn missing_required_field_names_the_field() {
    let app = test_app();
    let cases = [
        ("pages", json!({ "title": "T" }), "Site ID is required"),
        ("menus", json!({ "site_id": "s1" }), "Name is required"),
        ("sites", json!({ "domain_names": ["a.com"] }), "Name is required"),
        ("templates", json!({ "name": "", "site_id": "s1" }), "Name is required"),
        ("blocks", json!({ "name": 42, "site_id": "s1" }), "Name is required"),
        ("translations", json!({ "site_id": "s1" }), "Key is required"),
    ];
    for (resource, body, message) in cases {
        let (status, json) = send(&app, Method::POST, &format!("/api/{}", resource), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{resource}");
        assert_eq!(json, json!({ "success": false, "error": message }), "{resource}");
    }
}

#[tokio::test]
async fn created_records_read_back_unchanged() {
    let app = test_app();
    let cases = [
        ("pages", json!({ "title": "Home", "site_id": "s1", "content": "<p>hi</p>", "status": "active" })),
        ("menus", json!({ "name": "Main", "site_id": "s1" })),
        ("sites", json!({ "name": "Site", "domain_names": ["example.com", "www.example.com"] })),
        ("templates", json!({ "name": "Base", "site_id": "s1", "content": "{{ content }}" })),
        (
            "blocks",
            json!({ "name": "Hero", "site_id": "s1", "content": "c", "page_id": "p1", "template_id": "t1", "parent_id": "b0", "sequence": 3 }),
        ),
        ("translations", json!({ "key": "greeting", "site_id": "s1", "content": { "en": "Hello" } })),
    ];
    for (resource, body) in cases {
        let created = create(&app, resource, body.clone()).await;
        let id = id_of(&created);
        let (status, fetched) = send(&app, Method::GET, &format!("/api/{}/{}", resource, id), None).await;
        assert_eq!(status, StatusCode::OK, "{resource}");
        assert_eq!(fetched, created, "{resource}");
        for (key, value) in body.as_object().unwrap() {
            assert_eq!(&fetched[key], value, "{resource}.{key}");
        }
        assert_eq!(fetched["soft_deleted"], false);
    }
}

#[tokio::test]
async fn block_optional_fields_default() {
    let app = test_app();
    let json = create(&app, "blocks", json!({ "name": "Hero", "site_id": "s1", "sequence": "first" })).await;
    assert_eq!(json["sequence"], 0);
    assert_eq!(json["content"], "");
    assert_eq!(json["page_id"], "");
}

/// Create body, update body, and the fields the update is expected to change. Empty
/// required fields and wrong-typed values in the update body are ignored.
fn update_cases() -> Vec<(&'static str, Value, Value, Value)> {
    vec![
        (
            "pages",
            json!({ "title": "Home", "site_id": "s1", "content": "old", "status": "active" }),
            json!({ "content": "new", "title": "", "status": 7 }),
            json!({ "content": "new" }),
        ),
        (
            "menus",
            json!({ "name": "Main", "site_id": "s1" }),
            json!({ "name": "Top", "site_id": "" }),
            json!({ "name": "Top" }),
        ),
        (
            "sites",
            json!({ "name": "Site", "domain_names": ["example.com"] }),
            json!({ "name": "Renamed", "domain_names": "example.org" }),
            json!({ "name": "Renamed" }),
        ),
        (
            "templates",
            json!({ "name": "Base", "site_id": "s1", "content": "{{ content }}" }),
            json!({ "name": null, "content": "<main/>" }),
            json!({ "content": "<main/>" }),
        ),
        (
            "blocks",
            json!({ "name": "Hero", "site_id": "s1", "content": "c", "page_id": "p1", "template_id": "t1", "parent_id": "b0", "sequence": 3 }),
            json!({ "parent_id": "b1", "sequence": 2.5, "page_id": 9, "template_id": false, "content": ["x"] }),
            json!({ "parent_id": "b1" }),
        ),
        (
            "translations",
            json!({ "key": "greeting", "site_id": "s1", "content": { "en": "Hello", "fr": "Bonjour" } }),
            json!({ "site_id": "s2", "key": 5, "content": { "en": "Hi", "fr": 2 } }),
            json!({ "site_id": "s2" }),
        ),
    ]
}

#[tokio::test]
async fn partial_update_keeps_other_fields() {
    let app = test_app();
    for (resource, body, update, changes) in update_cases() {
        let created = create(&app, resource, body).await;
        let id = id_of(&created);

        let (status, updated) = send(&app, Method::PUT, &format!("/api/{}/{}", resource, id), Some(update)).await;
        assert_eq!(status, StatusCode::OK, "{resource}: {updated}");

        let mut expected = created.clone();
        for (key, value) in changes.as_object().unwrap() {
            expected[key] = value.clone();
        }
        assert_eq!(updated, expected, "{resource}");

        let (_, fetched) = send(&app, Method::GET, &format!("/api/{}/{}", resource, id), None).await;
        assert_eq!(fetched, updated, "{resource}");
    }
}

#[tokio::test]
async fn block_sequence_ignores_non_integers_on_update() {
    let app = test_app();
    let id = id_of(&create(&app, "blocks", json!({ "name": "Hero", "site_id": "s1", "sequence": 4 })).await);
    for sequence in [json!(3.9), json!("2"), json!(null)] {
        let (status, json) = send(
            &app,
            Method::PUT,
            &format!("/api/blocks/{}", id),
            Some(json!({ "sequence": sequence.clone() })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["sequence"], 4, "{sequence}");
    }
}

#[tokio::test]
async fn update_and_delete_need_an_id() {
    let app = test_app();
    let (status, json) = send(&app, Method::PUT, "/api/menus", Some(json!({ "name": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Menu ID required for update");

    let (status, json) = send(&app, Method::DELETE, "/api/blocks", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Block ID required for delete");
}

#[tokio::test]
async fn missing_records_are_not_found() {
    let app = test_app();
    for (method, body) in [
        (Method::GET, None),
        (Method::PUT, Some(json!({ "name": "x" }))),
        (Method::DELETE, None),
    ] {
        let (status, json) = send(&app, method, "/api/templates/nope", body).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Template not found");
    }
}

#[tokio::test]
async fn soft_delete_hides_record_from_default_reads() {
    let app = test_app();
    for (resource, body, _, _) in update_cases() {
        let id = id_of(&create(&app, resource, body).await);

        let (status, json) = send(&app, Method::DELETE, &format!("/api/{}/{}", resource, id), None).await;
        assert_eq!(status, StatusCode::OK, "{resource}");
        assert_eq!(json["success"], true);
        assert!(json["message"].as_str().unwrap().ends_with("deleted successfully"));

        let (status, json) = send(&app, Method::GET, &format!("/api/{}/{}", resource, id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{resource}");
        assert_eq!(json["success"], false);

        let (status, json) = send(
            &app,
            Method::GET,
            &format!("/api/{}/{}?include_soft_deleted=true", resource, id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{resource}");
        assert_eq!(json["soft_deleted"], true, "{resource}");
        assert_eq!(json["id"], id);

        let (_, list) = send(&app, Method::GET, &format!("/api/{}", resource), None).await;
        assert_eq!(list[resource], json!([]), "{resource}");

        let (_, list) = send(&app, Method::GET, &format!("/api/{}?include_soft_deleted=true", resource), None).await;
        assert_eq!(list[resource].as_array().unwrap().len(), 1, "{resource}");

        let (status, _) = send(&app, Method::DELETE, &format!("/api/{}/{}", resource, id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{resource} second delete");
    }
}

#[tokio::test]
async fn list_filters_by_site_and_nests_under_plural_key() {
    let app = test_app();
    create(&app, "menus", json!({ "name": "Main", "site_id": "s1" })).await;
    create(&app, "menus", json!({ "name": "Footer", "site_id": "s2" })).await;
    create(&app, "menus", json!({ "name": "Main footer", "site_id": "s1" })).await;

    let (status, json) = send(&app, Method::GET, "/api/menus?site_id=s1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    let names: Vec<_> = json["menus"].as_array().unwrap().iter().map(|m| m["name"].clone()).collect();
    assert_eq!(names, [json!("Main"), json!("Main footer")]);

    let (_, json) = send(&app, Method::GET, "/api/menus?name=footer&limit=1", None).await;
    assert_eq!(json["menus"].as_array().unwrap().len(), 1);
    assert_eq!(json["menus"][0]["name"], "Footer");

    let (status, json) = send(&app, Method::GET, "/api/menus?limit=many", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid limit: many");
}

#[tokio::test]
async fn translation_content_forms() {
    let app = test_app();
    let map = create(
        &app,
        "translations",
        json!({ "key": "greeting", "site_id": "s1", "content": { "en": "Hello", "fr": "Bonjour" } }),
    )
    .await;
    let legacy = create(
        &app,
        "translations",
        json!({ "key": "farewell", "site_id": "s1", "locale": "en", "text": "Bye" }),
    )
    .await;

    let (_, json) = send(&app, Method::GET, &format!("/api/translations/{}", id_of(&map)), None).await;
    assert_eq!(json["content"], json!({ "en": "Hello", "fr": "Bonjour" }));

    let legacy_id = id_of(&legacy);
    send(
        &app,
        Method::PUT,
        &format!("/api/translations/{}", legacy_id),
        Some(json!({ "locale": "fr", "text": "Au revoir" })),
    )
    .await;
    let (_, json) = send(&app, Method::GET, &format!("/api/translations/{}", legacy_id), None).await;
    assert_eq!(json["content"], json!({ "en": "Bye", "fr": "Au revoir" }));
    assert_eq!(json["key"], "farewell");

    let (_, json) = send(&app, Method::GET, "/api/translations?locale=fr&key=greeting", None).await;
    let items = json["translations"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], map["id"]);
}

#[tokio::test]
async fn wrong_typed_translation_map_leaves_content_intact() {
    let app = test_app();
    let original = json!({ "en": "Hello", "fr": "Bonjour" });
    let created = create(
        &app,
        "translations",
        json!({ "key": "greeting", "site_id": "s1", "content": original.clone() }),
    )
    .await;
    let uri = format!("/api/translations/{}", id_of(&created));

    for content in [json!({ "en": 5 }), json!({ "en": "Hi", "fr": 2 })] {
        let (status, json) = send(&app, Method::PUT, &uri, Some(json!({ "content": content.clone() }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["content"], original, "{content}");

        let (_, json) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(json["content"], original, "{content}");
    }
}

#[tokio::test]
async fn site_domain_names_are_validated() {
    let app = test_app();
    let (status, json) = send(
        &app,
        Method::POST,
        "/api/sites",
        Some(json!({ "name": "Main", "domain_names": ["example.com", "EXAMPLE.com"] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Duplicate domain name: example.com");

    let site = create(&app, "sites", json!({ "name": "Main", "domain_names": ["Example.com"] })).await;
    assert_eq!(site["domain_names"], json!(["example.com"]));

    let (status, json) = send(
        &app,
        Method::PUT,
        &format!("/api/sites/{}", id_of(&site)),
        Some(json!({ "domain_names": ["not a domain"] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid domain name: not a domain");
}

#[tokio::test]
async fn path_shape_errors() {
    let app = test_app();

    let (status, json) = send(&app, Method::GET, "/api/widgets", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().starts_with("Unknown resource"));

    for uri in ["/pages", "/api", "/api/pages/1/2"] {
        let (status, json) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(json["success"], false, "{uri}");
    }
}

#[tokio::test]
async fn unsupported_methods_are_rejected() {
    let app = test_app();
    for (method, uri) in [
        (Method::PATCH, "/api/pages/abc"),
        (Method::PATCH, "/api/translations"),
        (Method::POST, "/api/sites/abc"),
    ] {
        let (status, json) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{uri}");
        assert_eq!(json["error"], "Method not allowed");
    }
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() {
    let app = test_app();
    for raw in ["{not json", "[1, 2]", ""] {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/pages")
            .body(Body::from(raw))
            .unwrap();
        let (status, json) = send_request(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{raw:?}");
        assert_eq!(json["success"], false);
    }
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let app = app(AppState::new(Arc::new(MemoryStore::new())).with_body_limit(16));
    let (status, json) = send(
        &app,
        Method::POST,
        "/api/pages",
        Some(json!({ "title": "A title long enough", "site_id": "s1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().starts_with("Failed to read request body"));
}

#[tokio::test]
async fn common_routes_respond() {
    let app = test_app();
    let (status, json) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");

    let (status, json) = send(&app, Method::GET, "/version", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "content-api");

    let (status, json) = send(&app, Method::GET, "/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["components"]["schemas"]["PageBody"].is_object());
}
