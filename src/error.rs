//! Error types for gatehouse.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

/// Failures raised by the credential store.
///
/// Invalid credentials are not an error: `CredentialStore::verify` returns
/// `Ok(None)` so that an unknown email and a wrong password are
/// indistinguishable to callers.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Signup with an email that already has an account.
    #[error("email address already registered")]
    DuplicateEmail,

    /// Password hashing or hash parsing failed.
    #[error("credential hashing failed: {0}")]
    Hash(String),

    /// Underlying persistence failed.
    #[error("storage failure")]
    Storage(#[from] sqlx::Error),
}

/// Errors surfaced by the page handlers.
#[derive(Debug, Error)]
pub enum WebError {
    /// Template rendering error.
    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    /// Credential store failure that is not a recoverable form error.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Internal error.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        // The body stays generic: raw storage or hashing errors are logged,
        // never rendered.
        tracing::error!(error = %self, "request failed");

        let html = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Error</title>
</head>
<body>
    <h1>Something went wrong</h1>
    <p>The request could not be completed. Please try again later.</p>
    <a href="/">Back to home</a>
</body>
</html>"#;

        (StatusCode::INTERNAL_SERVER_ERROR, Html(html)).into_response()
    }
}
