//! Integration tests for user lookup, update, and deletion.

mod common;

use axum::http::StatusCode;

use common::TestApp;

#[tokio::test]
async fn test_list_users() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/users", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, serde_json::json!([]));

    app.signup("alice", "password123", Some("alice@example.com"))
        .await;
    app.signup("bob", "password456", None).await;

    let response = app.request("GET", "/users", None, None).await;
    assert_eq!(response.status, StatusCode::OK);

    let users = response.body.as_array().expect("expected an array");
    assert_eq!(users.len(), 2);
    // Listing is ordered by id ascending.
    assert_eq!(users[0]["username"], "alice");
    assert_eq!(users[1]["username"], "bob");
    assert!(users[0]["id"].as_i64().unwrap() < users[1]["id"].as_i64().unwrap());
}

#[tokio::test]
async fn test_get_user_by_id() {
    let app = TestApp::new().await;
    let response = app
        .signup("alice", "password123", Some("alice@example.com"))
        .await;
    let id = response.body["id"].as_i64().unwrap();

    let response = app.request("GET", &format!("/users/{}", id), None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "alice");
    assert_eq!(response.body["email"], "alice@example.com");
}

#[tokio::test]
async fn test_get_unknown_user_by_id() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/users/9999", None, None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
    assert_eq!(response.body["message"], "User with id 9999 not found");
}

#[tokio::test]
async fn test_get_user_by_username() {
    let app = TestApp::new().await;
    app.signup("alice", "password123", None).await;

    let response = app
        .request("GET", "/users/username/alice", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "alice");

    let response = app
        .request("GET", "/users/username/ghost", None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.body["message"],
        "User with username ghost not found"
    );
}

#[tokio::test]
async fn test_username_lookup_is_exact() {
    let app = TestApp::new().await;
    app.signup("Alice", "password123", None).await;

    let response = app
        .request("GET", "/users/username/alice", None, None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_user_by_email() {
    let app = TestApp::new().await;
    app.signup("alice", "password123", Some("alice@example.com"))
        .await;

    let response = app
        .request("GET", "/users/email/alice@example.com", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "alice");

    let response = app
        .request("GET", "/users/email/nobody@example.com", None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.body["message"],
        "User with email nobody@example.com not found"
    );
}

#[tokio::test]
async fn test_update_user_fields() {
    let app = TestApp::new().await;
    let response = app
        .signup("alice", "password123", Some("alice@example.com"))
        .await;
    let id = response.body["id"].as_i64().unwrap();

    // Patch only the username; the email must survive.
    let response = app
        .request(
            "PATCH",
            &format!("/users/{}", id),
            Some(serde_json::json!({"username": "alice2"})),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["username"], "alice2");
    assert_eq!(response.body["email"], "alice@example.com");

    // Patch only the email.
    let response = app
        .request(
            "PATCH",
            &format!("/users/{}", id),
            Some(serde_json::json!({"email": "alice2@example.com"})),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "alice2");
    assert_eq!(response.body["email"], "alice2@example.com");

    // An empty patch changes nothing.
    let response = app
        .request(
            "PATCH",
            &format!("/users/{}", id),
            Some(serde_json::json!({})),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "alice2");
    assert_eq!(response.body["email"], "alice2@example.com");
}

#[tokio::test]
async fn test_update_to_taken_username() {
    let app = TestApp::new().await;
    app.signup("alice", "password123", None).await;
    let response = app.signup("bob", "password456", None).await;
    let bob_id = response.body["id"].as_i64().unwrap();

    let response = app
        .request(
            "PATCH",
            &format!("/users/{}", bob_id),
            Some(serde_json::json!({"username": "alice"})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "CONFLICT");
    assert_eq!(response.body["message"], "Username 'alice' already exists");
}

#[tokio::test]
async fn test_update_unknown_user() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "PATCH",
            "/users/9999",
            Some(serde_json::json!({"username": "ghost"})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "User with id 9999 not found");
}

#[tokio::test]
async fn test_update_rejects_invalid_email() {
    let app = TestApp::new().await;
    let response = app.signup("alice", "password123", None).await;
    let id = response.body["id"].as_i64().unwrap();

    let response = app
        .request(
            "PATCH",
            &format!("/users/{}", id),
            Some(serde_json::json!({"email": "not-an-email"})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION");
}

#[tokio::test]
async fn test_delete_user() {
    let app = TestApp::new().await;
    let response = app.signup("alice", "password123", None).await;
    let id = response.body["id"].as_i64().unwrap();

    let response = app
        .request("DELETE", &format!("/users/{}", id), None, None)
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app.request("GET", &format!("/users/{}", id), None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    // Deleting again reports the user as gone.
    let response = app
        .request("DELETE", &format!("/users/{}", id), None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.body["message"],
        format!("User with id {} not found", id)
    );

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&app.db_pool)
        .await
        .expect("count query failed");
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_full_account_lifecycle() {
    let app = TestApp::new().await;

    let response = app
        .signup("carol", "password123", Some("carol@example.com"))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let id = response.body["id"].as_i64().unwrap();

    let token = app.login("carol", "password123").await;

    let response = app.request("GET", "/users/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "carol");

    // Renaming does not invalidate the token (the subject is the id).
    let response = app
        .request(
            "PATCH",
            &format!("/users/{}", id),
            Some(serde_json::json!({"username": "caroline"})),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", "/users/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "caroline");

    // The password is untouched by a profile update.
    let token = app.login("caroline", "password123").await;

    let response = app
        .request("DELETE", &format!("/users/{}", id), None, None)
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app.request("GET", "/users/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
