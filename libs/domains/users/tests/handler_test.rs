//! Handler tests for the users domain
//!
//! These drive `handlers::router` directly with `oneshot`, checking:
//! - Status codes and error codes for every failure kind
//! - The response envelope shape
//! - That no response ever carries password material

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    let hasher = PasswordHasher::new(HashingConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    })
    .unwrap();
    handlers::router(UserService::with_hasher(InMemoryUserStore::new(), hasher))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn create(app: &Router, name: &str, email: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/",
        Some(json!({
            "name": name,
            "email": email,
            "type": "jobseeker",
            "password": "securepassword123"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"].clone()
}

fn assert_no_password(value: &Value) {
    let text = value.to_string();
    assert!(!text.contains("password"), "leaked password field: {text}");
    assert!(!text.contains("$argon2"), "leaked hash: {text}");
}

#[tokio::test]
async fn test_create_user_returns_201_with_envelope() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/",
        Some(json!({
            "name": "  John Doe ",
            "email": " John@Example.com ",
            "type": "organization",
            "password": "securepassword123"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["name"], "John Doe");
    assert_eq!(body["data"]["email"], "john@example.com");
    assert_eq!(body["data"]["type"], "organization");
    assert!(body.get("error").is_none());
    assert_no_password(&body);
}

#[tokio::test]
async fn test_create_user_validation_codes() {
    let app = app();

    let cases = [
        (json!({"email": "a@b.c", "password": "pw"}), "missing_name"),
        (json!({"name": "A", "email": "  ", "password": "pw"}), "missing_email"),
        (json!({"name": "A", "email": "a@b.c"}), "missing_password"),
        (json!({"name": "A", "email": "abc", "password": "pw"}), "invalid_email"),
    ];

    for (payload, code) in cases {
        let (status, body) = send(&app, "POST", "/", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], code);
    }
}

#[tokio::test]
async fn test_null_fields_report_validation_codes() {
    let app = app();

    let cases = [
        (json!({"name": null, "email": "a@b.c", "password": "pw"}), "missing_name"),
        (json!({"name": "A", "email": null, "password": "pw"}), "missing_email"),
        (json!({"name": "A", "email": "a@b.c", "password": null}), "missing_password"),
    ];

    for (payload, code) in cases {
        let (status, body) = send(&app, "POST", "/", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], code);
    }

    let (status, body) = send(
        &app,
        "POST",
        "/",
        Some(json!({"name": "A", "email": "a@b.c", "password": "pw", "type": null})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["type"], "jobseeker");
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "invalid_request");
}

#[tokio::test]
async fn test_unknown_user_type_is_rejected() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/",
        Some(json!({"name": "A", "email": "a@b.c", "password": "pw", "type": "owner"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");
}

#[tokio::test]
async fn test_duplicate_email_returns_409() {
    let app = app();
    create(&app, "John", " John@Example.com ").await;

    let (status, body) = send(
        &app,
        "POST",
        "/",
        Some(json!({"name": "Other", "email": "JOHN@EXAMPLE.COM", "password": "pw"})),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "duplicate_email");

    let (_, list) = send(&app, "GET", "/", None).await;
    assert_eq!(list["data"]["pagination"]["total"], 1);
}

#[tokio::test]
async fn test_get_user() {
    let app = app();
    let created = create(&app, "John", "john@example.com").await;

    let (status, body) = send(&app, "GET", "/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], created);
    assert_no_password(&body);

    let (status, body) = send(&app, "GET", "/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "user_not_found");
}

#[tokio::test]
async fn test_invalid_ids_return_400() {
    let app = app();

    for uri in ["/abc", "/0", "/-5"] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"], "invalid_id");
    }

    let (status, _) = send(&app, "DELETE", "/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "PUT", "/abc", Some(json!({"name": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_user_partial() {
    let app = app();
    let created = create(&app, "John", "john@example.com").await;

    let (status, body) = send(&app, "PUT", "/1", Some(json!({"name": "Johnny", "email": ""}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User updated successfully");
    assert_eq!(body["data"]["name"], "Johnny");
    assert_eq!(body["data"]["email"], "john@example.com");
    assert_eq!(body["data"]["created_at"], created["created_at"]);
    assert_no_password(&body);
}

#[tokio::test]
async fn test_update_with_empty_type_keeps_type() {
    let app = app();
    let (status, _) = send(
        &app,
        "POST",
        "/",
        Some(json!({"name": "A", "email": "a@example.com", "password": "pw", "type": "organization"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "PUT", "/1", Some(json!({"name": "B", "type": ""}))).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["name"], "B");
    assert_eq!(body["data"]["type"], "organization");

    let (status, body) = send(&app, "PUT", "/1", Some(json!({"type": "owner"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");

    let (status, body) = send(&app, "PUT", "/1", Some(json!({"type": "admin-staff"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["type"], "admin-staff");
}

#[tokio::test]
async fn test_update_errors() {
    let app = app();
    create(&app, "A", "a@example.com").await;
    create(&app, "B", "b@example.com").await;

    let (status, body) = send(&app, "PUT", "/1", Some(json!({"email": "B@example.com"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "duplicate_email");

    let (status, body) = send(&app, "PUT", "/1", Some(json!({"email": "nope"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_email");

    let (status, body) = send(&app, "PUT", "/9", Some(json!({"name": "Ghost"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "user_not_found");
}

#[tokio::test]
async fn test_delete_user_twice() {
    let app = app();
    create(&app, "John", "john@example.com").await;

    let (status, body) = send(&app, "DELETE", "/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted successfully");
    assert_eq!(body["data"]["deleted_user"]["email"], "john@example.com");
    assert_no_password(&body);

    let (status, body) = send(&app, "DELETE", "/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "user_not_found");

    // Email is free again, id is not reused
    let recreated = create(&app, "John", "john@example.com").await;
    assert_eq!(recreated["id"], 2);
}

#[tokio::test]
async fn test_list_users_pagination() {
    let app = app();
    for i in 1..=25 {
        create(&app, &format!("User {i}"), &format!("user{i}@example.com")).await;
    }

    let (status, body) = send(&app, "GET", "/?page=3&limit=10", None).await;
    assert_eq!(status, StatusCode::OK);
    let users = body["data"]["users"].as_array().unwrap();
    let ids: Vec<i64> = users.iter().map(|u| u["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![21, 22, 23, 24, 25]);
    assert_eq!(
        body["data"]["pagination"],
        json!({"page": 3, "limit": 10, "total": 25, "total_pages": 3, "has_more": false})
    );
    assert_no_password(&body);

    let (_, body) = send(&app, "GET", "/?page=4&limit=10", None).await;
    assert_eq!(body["data"]["users"], json!([]));
    assert_eq!(body["data"]["pagination"]["has_more"], false);

    let (_, body) = send(&app, "GET", "/", None).await;
    assert_eq!(body["data"]["users"].as_array().unwrap().len(), 10);
    assert_eq!(body["data"]["pagination"]["has_more"], true);

    let (_, body) = send(&app, "GET", "/?page=0&limit=1000", None).await;
    assert_eq!(body["data"]["pagination"]["page"], 1);
    assert_eq!(body["data"]["pagination"]["limit"], 100);
    assert_eq!(body["data"]["users"].as_array().unwrap().len(), 25);

    let (status, body) = send(&app, "GET", "/?page=abc", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pagination"]["page"], 1);
}

#[tokio::test]
async fn test_bad_limit_keeps_requested_page() {
    let app = app();
    for i in 1..=25 {
        create(&app, &format!("User {i}"), &format!("user{i}@example.com")).await;
    }

    let (status, body) = send(&app, "GET", "/?page=2&limit=abc", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body["data"]["users"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, (11..=20).collect::<Vec<_>>());
    assert_eq!(body["data"]["pagination"]["page"], 2);
    assert_eq!(body["data"]["pagination"]["limit"], 10);

    let (_, body) = send(&app, "GET", "/?page=3&limit=", None).await;
    assert_eq!(body["data"]["pagination"]["page"], 3);
    assert_eq!(body["data"]["pagination"]["limit"], 10);
    assert_eq!(body["data"]["users"].as_array().unwrap().len(), 5);
}
