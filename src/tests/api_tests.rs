use crate::api;
use crate::tests::create_test_service;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "userhub-test-boundary";

async fn test_app() -> (TempDir, Router) {
    let (dir, service) = create_test_service().await;
    (dir, api::router(service, Duration::from_secs(30)))
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
}

fn form_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/form")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart_request(field: &str, file_name: &str, contents: &str) -> Request<Body> {
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: text/plain\r\n\r\n{contents}\r\n--{b}--\r\n",
        b = BOUNDARY,
    );
    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", BOUNDARY))
        .body(Body::from(body))
        .unwrap()
}

async fn create(app: &Router, name: &str, email: &str) -> (StatusCode, Value) {
    send(app, json_request("POST", "/users", json!({ "name": name, "email": email }))).await
}

#[tokio::test]
async fn test_create_two_users_assigns_ids_one_and_two() {
    let (_dir, app) = test_app().await;

    let (status, body) = create(&app, "A", "a@x.com").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["status"], 201);
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["name"], "A");
    assert_eq!(body["data"]["email"], "a@x.com");
    assert!(body["data"]["created_at"].as_str().is_some_and(|s| !s.is_empty()));

    let (status, body) = create(&app, "B", "b@x.com").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], 2);
}

#[tokio::test]
async fn test_list_users_in_insertion_order() {
    let (_dir, app) = test_app().await;
    let (_, body) = send(&app, empty_request("GET", "/users")).await;
    assert_eq!(body, json!({ "message": "Users retrieved successfully", "status": 200, "data": [] }));

    create(&app, "A", "a@x.com").await;
    create(&app, "B", "b@x.com").await;

    let (status, body) = send(&app, empty_request("GET", "/users")).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["A", "B"]);
}

#[tokio::test]
async fn test_responses_are_json() {
    let (_dir, app) = test_app().await;

    for req in [empty_request("GET", "/users"), empty_request("DELETE", "/users/1")] {
        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    }
}

#[tokio::test]
async fn test_delete_on_empty_store_is_not_found() {
    let (_dir, app) = test_app().await;

    let (status, body) = send(&app, empty_request("DELETE", "/users/1")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "User not found", "status": 404 }));
}

#[tokio::test]
async fn test_delete_existing_user_has_no_data() {
    let (_dir, app) = test_app().await;
    create(&app, "A", "a@x.com").await;
    create(&app, "B", "b@x.com").await;

    let (status, body) = send(&app, empty_request("DELETE", "/users/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "User deleted successfully", "status": 200 }));

    let (_, body) = send(&app, empty_request("GET", "/users")).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["id"], 2);
}

#[tokio::test]
async fn test_update_keeps_created_at() {
    let (_dir, app) = test_app().await;
    create(&app, "A", "a@x.com").await;
    let (_, created) = create(&app, "B", "b@x.com").await;

    let (status, body) = send(&app, json_request("PUT", "/users/2", json!({ "name": "B2" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User updated successfully");
    assert_eq!(body["data"]["id"], 2);
    assert_eq!(body["data"]["name"], "B2");
    assert_eq!(body["data"]["created_at"], created["data"]["created_at"]);

    let (_, list) = send(&app, empty_request("GET", "/users")).await;
    assert_eq!(list["data"][1]["name"], "B2");
    assert_eq!(list["data"][0]["name"], "A");
}

#[tokio::test]
async fn test_update_unknown_or_non_numeric_id_is_not_found() {
    let (_dir, app) = test_app().await;
    create(&app, "A", "a@x.com").await;

    for uri in ["/users/9", "/users/abc", "/users/01", "/users/+1"] {
        let (status, body) = send(&app, json_request("PUT", uri, json!({ "name": "X", "email": "x@x.com" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "uri {}", uri);
        assert_eq!(body["message"], "User not found");
    }

    let (_, list) = send(&app, empty_request("GET", "/users")).await;
    assert_eq!(list["data"][0]["name"], "A");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (_dir, app) = test_app().await;

    let bad_post = Request::builder()
        .method("POST")
        .uri("/users")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let (status, body) = send(&app, bad_post).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["message"].as_str().unwrap().contains("EOF"));

    create(&app, "A", "a@x.com").await;
    let bad_put = Request::builder()
        .method("PUT")
        .uri("/users/1")
        .body(Body::from("[1, 2]"))
        .unwrap();
    let (status, _) = send(&app, bad_put).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversized_json_body_is_enveloped_bad_request() {
    let (_dir, app) = test_app().await;

    let name = "x".repeat(3 * 1024 * 1024);
    let (status, body) = send(&app, json_request("POST", "/users", json!({ "name": name, "email": "a@x.com" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));

    let (_, list) = send(&app, empty_request("GET", "/users")).await;
    assert_eq!(list["data"], json!([]));
}

#[tokio::test]
async fn test_wrong_method_is_rejected_before_store_access() {
    let (_dir, app) = test_app().await;
    create(&app, "A", "a@x.com").await;

    let cases = [
        empty_request("PUT", "/users"),
        empty_request("DELETE", "/users"),
        empty_request("GET", "/users/1"),
        empty_request("POST", "/users/1"),
        empty_request("GET", "/form"),
        empty_request("GET", "/upload"),
        empty_request("PUT", "/upload"),
    ];
    for req in cases {
        let label = format!("{} {}", req.method(), req.uri());
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{}", label);
        assert_eq!(body, json!({ "message": "Method not allowed", "status": 405 }), "{}", label);
    }

    let (_, list) = send(&app, empty_request("GET", "/users")).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_form_creates_user_with_200() {
    let (_dir, app) = test_app().await;
    create(&app, "A", "a@x.com").await;

    let (status, body) = send(&app, form_request("name=C&email=c%40x.com")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Form data processed successfully");
    assert_eq!(body["status"], 200);
    assert_eq!(body["data"]["id"], 2);
    assert_eq!(body["data"]["name"], "C");
    assert_eq!(body["data"]["email"], "c@x.com");

    let (_, list) = send(&app, empty_request("GET", "/users")).await;
    assert_eq!(list["data"][1]["name"], "C");
}

#[tokio::test]
async fn test_form_without_form_content_type_is_bad_request() {
    let (_dir, app) = test_app().await;

    let (status, body) = send(&app, json_request("POST", "/form", json!({ "name": "C" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_upload_stores_file_under_original_name() {
    let (dir, app) = test_app().await;

    let (status, body) = send(&app, multipart_request("file", "hello.txt", "hello world")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "File hello.txt uploaded successfully", "status": 200 }));
    let stored = std::fs::read_to_string(dir.path().join("uploads").join("hello.txt")).unwrap();
    assert_eq!(stored, "hello world");

    send(&app, multipart_request("file", "hello.txt", "second")).await;
    let stored = std::fs::read_to_string(dir.path().join("uploads").join("hello.txt")).unwrap();
    assert_eq!(stored, "second");
}

#[tokio::test]
async fn test_upload_write_failure_is_server_error() {
    let (dir, app) = test_app().await;
    std::fs::write(dir.path().join("uploads"), b"not a directory").unwrap();

    let (status, body) = send(&app, multipart_request("file", "hello.txt", "hello world")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], 500);
    assert!(body["message"].as_str().unwrap().starts_with("Upload failed: "));
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_upload_without_file_part_is_bad_request() {
    let (_dir, app) = test_app().await;

    let (status, body) = send(&app, multipart_request("attachment", "hello.txt", "hi")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    let (status, _) = send(&app, json_request("POST", "/upload", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_and_openapi_document() {
    let (_dir, app) = test_app().await;

    let response = app.clone().oneshot(empty_request("GET", "/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");

    let (status, doc) = send(&app, empty_request("GET", "/api-docs/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    for path in ["/users", "/users/{id}", "/form", "/upload"] {
        assert!(doc["paths"].get(path).is_some(), "missing {}", path);
    }
}
