//! Web authentication tests.
//!
//! Integration tests driving the full router: signup, login, session
//! guard, and the injection/markup safety properties.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use gatehouse::app::build_app;
use gatehouse::auth::CredentialStore;
use gatehouse::{AppConfig, AppState, SessionConfig};
use serde_json::json;

/// Create a test configuration over an in-memory database.
fn create_test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".to_string(),
        session: SessionConfig {
            secret: "test-secret-key-for-testing-only".to_string(),
            issuer: "gatehouse".to_string(),
            audience: "gatehouse-web".to_string(),
            ttl_minutes: 5,
        },
    }
}

/// Create a test server with an isolated in-memory database.
///
/// Cookies are saved across requests so a login establishes a session for
/// the rest of the test.
async fn create_test_server() -> (TestServer, AppState) {
    let config = Arc::new(create_test_config());
    let state = AppState::connect(config)
        .await
        .expect("failed to create test state");

    let server = TestServer::builder()
        .save_cookies()
        .build(build_app(state.clone()))
        .expect("failed to create test server");

    (server, state)
}

/// Helper to sign up a user through the form endpoint.
async fn signup(server: &TestServer, email: &str, name: &str, password: &str) -> axum_test::TestResponse {
    server
        .post("/signup")
        .form(&json!({
            "email": email,
            "name": name,
            "password": password,
        }))
        .await
}

/// Helper to log in through the form endpoint.
async fn login(server: &TestServer, email: &str, password: &str) -> axum_test::TestResponse {
    server
        .post("/login")
        .form(&json!({
            "email": email,
            "password": password,
        }))
        .await
}

fn location(response: &axum_test::TestResponse) -> String {
    response
        .header("location")
        .to_str()
        .expect("location header should be a string")
        .to_string()
}

// ============================================================================
// Pages
// ============================================================================

#[tokio::test]
async fn homepage_renders() {
    let (server, _state) = create_test_server().await;

    let response = server.get("/").await;
    response.assert_status_ok();
    assert!(response.text().contains("Gatehouse"));
}

#[tokio::test]
async fn signup_form_renders() {
    let (server, _state) = create_test_server().await;

    let response = server.get("/signup").await;
    response.assert_status_ok();
    assert!(response.text().contains("Sign up"));
}

#[tokio::test]
async fn health_endpoint_responds() {
    let (server, _state) = create_test_server().await;

    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "ok");
}

// ============================================================================
// Access control
// ============================================================================

#[tokio::test]
async fn anonymous_profile_redirects_to_login() {
    let (server, _state) = create_test_server().await;

    let response = server.get("/profile").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn garbage_session_cookie_redirects_to_login() {
    let (server, _state) = create_test_server().await;

    let response = server
        .get("/profile")
        .add_header(
            axum::http::header::COOKIE,
            axum::http::HeaderValue::from_static("session=not-a-real-token"),
        )
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

// ============================================================================
// Signup and login flow
// ============================================================================

#[tokio::test]
async fn signup_then_login_reaches_profile() {
    let (server, _state) = create_test_server().await;

    let response = signup(&server, "user@test.com", "test user", "test123").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let response = login(&server, "user@test.com", "test123").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/profile");

    let response = server.get("/profile").await;
    response.assert_status_ok();
    assert!(response.text().contains("test user"));
}

#[tokio::test]
async fn passwords_are_stored_hashed() {
    let (server, state) = create_test_server().await;

    signup(&server, "user@test.com", "test user", "test123").await;

    let stored: String =
        sqlx::query_scalar("SELECT password_hash FROM users WHERE email = ?")
            .bind("user@test.com")
            .fetch_one(&state.db)
            .await
            .expect("user row exists");
    assert_ne!(stored, "test123");
    assert!(stored.starts_with("$argon2"));

    let store = CredentialStore::new(&state.db);
    let user = store
        .verify("user@test.com", "test123")
        .await
        .expect("verify should not error")
        .expect("stored hash matches the original password");
    assert_eq!(user.email, "user@test.com");
}

#[tokio::test]
async fn unknown_email_and_wrong_password_are_indistinguishable() {
    let (server, _state) = create_test_server().await;

    signup(&server, "user@test.com", "test user", "test123").await;

    let unknown = login(&server, "nobody@test.com", "test123").await;
    unknown.assert_status_ok();
    let wrong = login(&server, "user@test.com", "wrong-password").await;
    wrong.assert_status_ok();

    // Same page, same message; the response must not leak which part was
    // wrong.
    assert_eq!(unknown.text(), wrong.text());
    assert!(unknown.text().contains("check your login details"));
}

#[tokio::test]
async fn empty_fields_redisplay_signup_form() {
    let (server, state) = create_test_server().await;

    let response = signup(&server, "user@test.com", "test user", "").await;
    response.assert_status_ok();
    assert!(response.text().contains("required"));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&state.db)
        .await
        .expect("count users");
    assert_eq!(count, 0);
}

// ============================================================================
// Uniqueness
// ============================================================================

#[tokio::test]
async fn duplicate_signup_reports_error_without_duplicate_row() {
    let (server, state) = create_test_server().await;

    let first = signup(&server, "user@test.com", "test user", "test123").await;
    first.assert_status(StatusCode::SEE_OTHER);

    let second = signup(&server, "user@test.com", "someone else", "other456").await;
    second.assert_status_ok();
    assert!(second.text().contains("already exists"));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&state.db)
        .await
        .expect("count users");
    assert_eq!(count, 1);

    // The original account still logs in.
    let response = login(&server, "user@test.com", "test123").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/profile");
}

// ============================================================================
// Injection and markup safety
// ============================================================================

#[tokio::test]
async fn sql_syntax_in_email_is_stored_literally() {
    let (server, state) = create_test_server().await;

    let hostile = r#"user@test.com"; drop table users; -- "#;
    let response = signup(&server, hostile, "test user", "test123").await;
    response.assert_status(StatusCode::SEE_OTHER);

    // The table survived and holds exactly the literal value.
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&state.db)
        .await
        .expect("users table still exists");
    assert_eq!(count, 1);

    let response = login(&server, hostile, "test123").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/profile");
}

#[tokio::test]
async fn markup_in_name_is_never_rendered_live() {
    let (server, _state) = create_test_server().await;

    signup(
        &server,
        "new@email.com",
        r#"<script>alert("hello");</script>"#,
        "testpassword",
    )
    .await;
    login(&server, "new@email.com", "testpassword").await;

    let response = server.get("/profile").await;
    response.assert_status_ok();
    let html = response.text();
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

// ============================================================================
// Logout
// ============================================================================

#[tokio::test]
async fn logout_ends_the_session() {
    let (server, _state) = create_test_server().await;

    signup(&server, "user@test.com", "test user", "test123").await;
    login(&server, "user@test.com", "test123").await;
    server.get("/profile").await.assert_status_ok();

    let response = server.get("/logout").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let response = server.get("/profile").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}
