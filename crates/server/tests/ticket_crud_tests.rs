//! Integration tests for ticket CRUD operations.

mod common;

use axum::http::StatusCode;
use common::TestServer;
use serde_json::json;

// Helper to make JSON requests (duplicated for test isolation)
async fn json_request(
    router: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let mut builder = Request::builder().method(method).uri(uri);

    let body = match body {
        Some(v) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&v).unwrap())
        }
        None => Body::empty(),
    };

    let request = builder.body(body).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body_json: serde_json::Value = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, body_json)
}

fn ticket_body() -> serde_json::Value {
    json!({
        "title": "Fix bug",
        "description": "NPE on save",
        "status": "open",
        "priority": "high"
    })
}

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::new().await;
    let (status, body) = json_request(&server.router, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("ok"));
}

#[tokio::test]
async fn test_create_ticket_returns_created_record() {
    let server = TestServer::new().await;

    let (status, ticket) =
        json_request(&server.router, "POST", "/api/tickets", Some(ticket_body())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(ticket.get("id").and_then(|v| v.as_str()).is_some());
    assert_eq!(ticket.get("title").and_then(|v| v.as_str()), Some("Fix bug"));
    assert_eq!(ticket.get("assignee").and_then(|v| v.as_str()), Some(""));
    assert_eq!(ticket.get("createdAt"), ticket.get("updatedAt"));
}

#[tokio::test]
async fn test_create_then_get_round_trips() {
    let server = TestServer::new().await;

    let (_, created) =
        json_request(&server.router, "POST", "/api/tickets", Some(ticket_body())).await;
    let id = created.get("id").unwrap().as_str().unwrap();

    let (status, fetched) =
        json_request(&server.router, "GET", &format!("/api/tickets/{id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_invalid_payload_returns_error_list() {
    let server = TestServer::new().await;

    let body = json!({
        "title": "ab",
        "description": "NPE on save",
        "status": "started",
        "priority": "high"
    });
    let (status, response) = json_request(&server.router, "POST", "/api/tickets", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.get("code").and_then(|v| v.as_str()),
        Some("validation_failed")
    );
    let errors = response.get("errors").unwrap().as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0], "title must be at least 3 chars");
    assert_eq!(
        errors[1],
        "status must be one of open, in_progress, review, closed"
    );
}

#[tokio::test]
async fn test_create_malformed_json_is_bad_request() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let server = TestServer::new().await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/tickets")
        .header("Content-Type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = server.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_unknown_ticket_is_not_found() {
    let server = TestServer::new().await;

    let (status, body) =
        json_request(&server.router, "GET", "/api/tickets/does-not-exist", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.get("code").and_then(|v| v.as_str()), Some("not_found"));
}

#[tokio::test]
async fn test_replace_overwrites_every_field() {
    let server = TestServer::new().await;

    let (_, created) =
        json_request(&server.router, "POST", "/api/tickets", Some(ticket_body())).await;
    let id = created.get("id").unwrap().as_str().unwrap();

    let replacement = json!({
        "title": "Fix crash",
        "description": "Stack trace attached",
        "status": "review",
        "priority": "urgent",
        "assignee": "alex"
    });
    let (status, updated) = json_request(
        &server.router,
        "PUT",
        &format!("/api/tickets/{id}"),
        Some(replacement),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated.get("id"), created.get("id"));
    assert_eq!(updated.get("createdAt"), created.get("createdAt"));
    assert_eq!(updated.get("title").and_then(|v| v.as_str()), Some("Fix crash"));
    assert_eq!(updated.get("status").and_then(|v| v.as_str()), Some("review"));
    assert_eq!(updated.get("assignee").and_then(|v| v.as_str()), Some("alex"));
}

#[tokio::test]
async fn test_replace_requires_a_full_payload() {
    let server = TestServer::new().await;

    let (_, created) =
        json_request(&server.router, "POST", "/api/tickets", Some(ticket_body())).await;
    let id = created.get("id").unwrap().as_str().unwrap();

    let (status, response) = json_request(
        &server.router,
        "PUT",
        &format!("/api/tickets/{id}"),
        Some(json!({"title": "Renamed completely"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = response.get("errors").unwrap().as_array().unwrap();
    assert_eq!(errors.len(), 3);
}

#[tokio::test]
async fn test_replace_unknown_ticket_is_not_found() {
    let server = TestServer::new().await;

    let (status, _) = json_request(
        &server.router,
        "PUT",
        "/api/tickets/does-not-exist",
        Some(ticket_body()),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_changes_only_supplied_fields() {
    let server = TestServer::new().await;

    let (_, created) =
        json_request(&server.router, "POST", "/api/tickets", Some(ticket_body())).await;
    let id = created.get("id").unwrap().as_str().unwrap();

    let (status, updated) = json_request(
        &server.router,
        "PATCH",
        &format!("/api/tickets/{id}"),
        Some(json!({"status": "closed"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated.get("status").and_then(|v| v.as_str()), Some("closed"));
    assert_eq!(updated.get("title"), created.get("title"));
    assert_eq!(updated.get("description"), created.get("description"));
    assert_eq!(updated.get("priority"), created.get("priority"));
    assert_eq!(updated.get("createdAt"), created.get("createdAt"));
    assert_ne!(updated.get("updatedAt"), created.get("updatedAt"));
}

#[tokio::test]
async fn test_patch_rejects_invalid_enum_value() {
    let server = TestServer::new().await;

    let (_, created) =
        json_request(&server.router, "POST", "/api/tickets", Some(ticket_body())).await;
    let id = created.get("id").unwrap().as_str().unwrap();

    let (status, response) = json_request(
        &server.router,
        "PATCH",
        &format!("/api/tickets/{id}"),
        Some(json!({"priority": "extreme"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = response.get("errors").unwrap().as_array().unwrap();
    assert_eq!(errors[0], "priority must be one of low, medium, high, urgent");
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let server = TestServer::new().await;

    let (_, created) =
        json_request(&server.router, "POST", "/api/tickets", Some(ticket_body())).await;
    let id = created.get("id").unwrap().as_str().unwrap();

    let (status, body) =
        json_request(&server.router, "DELETE", &format!("/api/tickets/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) =
        json_request(&server.router, "GET", &format!("/api/tickets/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_ticket_is_not_found() {
    let server = TestServer::new().await;

    let (status, _) =
        json_request(&server.router, "DELETE", "/api/tickets/does-not-exist", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
