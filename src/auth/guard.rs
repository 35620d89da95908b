//! Access guard for protected pages.
//!
//! Two states: anonymous and authenticated. A protected handler takes
//! [`CurrentUser`]; anonymous callers are redirected to the login page
//! rather than receiving an error. Pages that merely adapt to login state
//! take [`Visitor`], which never rejects.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::Redirect,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, warn};

use crate::auth::session::{SessionKeys, SESSION_COOKIE};
use crate::auth::store::CredentialStore;
use crate::auth::user::{Identity, User};
use crate::state::AppState;

/// The authenticated caller. Extraction fails to a redirect, never an
/// error response.
pub struct CurrentUser(pub User);

/// The caller, authenticated or not.
pub struct Visitor(pub Option<User>);

/// Resolve the session cookie to a user, if any.
///
/// Every failure mode (no cookie, bad token, unknown subject, storage
/// trouble) collapses to `None`; the request stays anonymous.
async fn authenticate(parts: &Parts, state: &AppState) -> Option<User> {
    let jar = CookieJar::from_headers(&parts.headers);
    let cookie = jar.get(SESSION_COOKIE)?;

    let keys = SessionKeys::from_ref(state);
    let claims = match keys.verify(cookie.value()) {
        Ok(claims) => claims,
        Err(err) => {
            debug!(error = %err, "invalid or expired session token");
            return None;
        }
    };

    match CredentialStore::new(&state.db).find_by_id(claims.sub).await {
        Ok(Some(user)) => Some(user).filter(|u| u.is_authenticated()),
        Ok(None) => {
            warn!(user_id = %claims.sub, "session for unknown user");
            None
        }
        Err(err) => {
            warn!(error = %err, "user lookup failed during session check");
            None
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state)
            .await
            .map(CurrentUser)
            .ok_or_else(|| Redirect::to("/login"))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Visitor {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Visitor(authenticate(parts, state).await))
    }
}
