//! Contact create, patch and list endpoints.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;

use common::{json_request, TestApp, API_KEY, TEST_EMAIL};

#[tokio::test]
async fn test_create_contact() {
    let app = TestApp::new();

    let (status, contact) = app.create_contact(json!({ "email": TEST_EMAIL })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(contact["id"], 1);
    assert_eq!(contact["email"], TEST_EMAIL);
    assert_eq!(contact["tags"], json!([]));
    assert_eq!(contact["fields"], json!([]));
}

#[tokio::test]
async fn test_create_contact_ids_increase() {
    let app = TestApp::new();

    let (_, first) = app.create_contact(json!({ "email": "a@example.com" })).await;
    let (_, second) = app.create_contact(json!({ "email": "b@example.com" })).await;
    assert!(second["id"].as_u64().unwrap() > first["id"].as_u64().unwrap());
}

#[tokio::test]
async fn test_create_contact_duplicate() {
    let app = TestApp::new();

    let (status, _) = app.create_contact(json!({ "email": TEST_EMAIL })).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.create_contact(json!({ "email": TEST_EMAIL })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "duplicate");
}

#[tokio::test]
async fn test_create_contact_missing_email() {
    let app = TestApp::new();

    let (status, body) = app.create_contact(json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "email parameter is missing");

    let (status, _) = app.create_contact(json!({ "email": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_contact_with_first_name() {
    let app = TestApp::new();

    let (status, contact) = app
        .create_contact(json!({
            "email": TEST_EMAIL,
            "fields": [{ "slug": "first_name", "value": "John" }]
        }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        contact["fields"],
        json!([{ "slug": "first_name", "value": "John" }])
    );
}

#[tokio::test]
async fn test_create_contact_malformed_fields() {
    let app = TestApp::new();

    let cases = [
        (json!("first_name"), "fields must be a list"),
        (json!(["first_name"]), "each field must be a dictionary (field 0)"),
        (
            json!([{ "slug": "first_name" }]),
            "each field must have 'slug' and 'value' keys (field 0)",
        ),
    ];
    for (fields, message) in cases {
        let (status, body) = app
            .create_contact(json!({ "email": TEST_EMAIL, "fields": fields }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], message);
    }

    let (_, contact) = app.create_contact(json!({ "email": TEST_EMAIL })).await;
    assert_eq!(contact["id"], 1, "rejected creates must not consume ids");
}

#[tokio::test]
async fn test_create_contact_invalid_json() {
    let app = TestApp::new();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/contacts")
        .header("X-API-Key", API_KEY)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"email\": "))
        .unwrap();
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("invalid JSON body"));
}

#[tokio::test]
async fn test_create_contact_unauthorized() {
    let app = TestApp::new();

    let request = json_request(
        Method::POST,
        "/api/contacts",
        &json!({ "email": TEST_EMAIL }),
        false,
    );
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/contacts")
        .header("X-API-Key", "")
        .body(Body::from(json!({ "email": TEST_EMAIL }).to_string()))
        .unwrap();
    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(app.state.backend.directory.is_empty());
}

#[tokio::test]
async fn test_any_api_key_value_is_accepted() {
    let app = TestApp::new();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/contacts")
        .header("x-api-key", "anything-at-all")
        .body(Body::from(json!({ "email": TEST_EMAIL }).to_string()))
        .unwrap();
    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn app_with_john_doe() -> TestApp {
    let app = TestApp::new();
    let (status, _) = app
        .create_contact(json!({
            "email": TEST_EMAIL,
            "fields": [
                { "slug": "first_name", "value": "John" },
                { "slug": "last_name", "value": "Doe" }
            ]
        }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    app
}

#[tokio::test]
async fn test_change_email() {
    let app = app_with_john_doe().await;

    let (status, patched) = app
        .patch_contact(1, json!({ "email": "test2@example.com" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["email"], "test2@example.com");

    let (status, list) = app.get("/api/contacts").await;
    assert_eq!(status, StatusCode::OK);
    let items = list["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["email"], "test2@example.com");
    assert_eq!(items[0]["fields"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_change_first_name() {
    let app = app_with_john_doe().await;

    let (status, _) = app
        .patch_contact(
            1,
            json!({ "fields": [{ "slug": "first_name", "value": "Jane" }] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, list) = app.get("/api/contacts").await;
    assert_eq!(
        list["items"][0]["fields"],
        json!([
            { "slug": "first_name", "value": "Jane" },
            { "slug": "last_name", "value": "Doe" }
        ])
    );
}

#[tokio::test]
async fn test_patch_adds_new_field() {
    let app = app_with_john_doe().await;

    let (_, patched) = app
        .patch_contact(1, json!({ "fields": [{ "slug": "city", "value": "Malmö" }] }))
        .await;
    assert_eq!(patched["fields"][2], json!({ "slug": "city", "value": "Malmö" }));
}

#[tokio::test]
async fn test_patch_unknown_contact() {
    let app = app_with_john_doe().await;

    let (status, body) = app.patch_contact(2, json!({ "email": "x@example.com" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "contact not found");

    let request = Request::builder()
        .method(Method::PATCH)
        .uri("/api/contacts/not-a-number")
        .header("X-API-Key", API_KEY)
        .header(header::CONTENT_TYPE, "application/merge-patch+json")
        .body(Body::from("{}"))
        .unwrap();
    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_requires_merge_patch_content_type() {
    let app = app_with_john_doe().await;

    let request = json_request(
        Method::PATCH,
        "/api/contacts/1",
        &json!({ "email": "x@example.com" }),
        true,
    );
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(
        body["error"],
        "Content-Type must be application/merge-patch+json"
    );

    let (_, list) = app.get("/api/contacts").await;
    assert_eq!(list["items"][0]["email"], TEST_EMAIL);
}

#[tokio::test]
async fn test_patch_unknown_contact_reported_before_content_type() {
    let app = TestApp::new();

    let request = json_request(Method::PATCH, "/api/contacts/9", &json!({}), true);
    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_unauthorized() {
    let app = app_with_john_doe().await;

    let request = Request::builder()
        .method(Method::PATCH)
        .uri("/api/contacts/1")
        .header(header::CONTENT_TYPE, "application/merge-patch+json")
        .body(Body::from(json!({ "email": "x@example.com" }).to_string()))
        .unwrap();
    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_patch_malformed_fields_is_rejected_atomically() {
    let app = app_with_john_doe().await;

    let (status, _) = app
        .patch_contact(
            1,
            json!({
                "email": "changed@example.com",
                "fields": [{ "slug": "first_name" }]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let contact = app.state.backend.directory.get_contact(1).unwrap();
    assert_eq!(contact.email, TEST_EMAIL);
}

#[tokio::test]
async fn test_list_contacts_filter_by_email() {
    let app = TestApp::new();
    app.create_contact(json!({ "email": "a@example.com" })).await;
    app.create_contact(json!({ "email": "b@example.com" })).await;

    let (status, list) = app.get("/api/contacts?email=b@example.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["hasMore"], false);
    assert_eq!(list["items"].as_array().unwrap().len(), 1);
    assert_eq!(list["items"][0]["id"], 2);

    let (_, list) = app.get("/api/contacts?email=nobody@example.com").await;
    assert_eq!(list, json!({ "items": [], "hasMore": false }));

    let (_, list) = app.get("/api/contacts?email=").await;
    assert_eq!(list["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_contacts_unauthorized() {
    let app = TestApp::new();

    let request = Request::builder()
        .uri("/api/contacts")
        .body(Body::empty())
        .unwrap();
    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
