//! Page handlers: thin glue between forms, the credential store and the
//! session guard.
//!
//! Recoverable failures (duplicate email, bad credentials, empty fields)
//! re-render the form with a message at HTTP 200; everything else becomes a
//! redirect. Unknown email and wrong password produce the same message so
//! responses do not reveal whether an account exists.

use askama::Template;
use axum::{
    extract::{FromRef, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{error, info, instrument, warn};

use crate::auth::{CredentialStore, CurrentUser, SessionKeys, Visitor};
use crate::error::{AuthError, WebError};
use crate::state::AppState;
use crate::web::forms::{LoginForm, SignupForm};
use crate::web::templates::{IndexTemplate, LoginTemplate, ProfileTemplate, SignupTemplate};

const BAD_CREDENTIALS: &str = "Please check your login details and try again.";
const DUPLICATE_EMAIL: &str = "Email address already exists.";
const MISSING_FIELDS: &str = "Email and password are required.";

pub async fn index(Visitor(user): Visitor) -> Result<Response, WebError> {
    let page = IndexTemplate {
        user_name: user.map(|u| u.name),
    };
    Ok(Html(page.render()?).into_response())
}

pub async fn signup_form() -> Result<Response, WebError> {
    render_signup(None)
}

#[instrument(skip(state, form))]
pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> Result<Response, WebError> {
    if form.email.is_empty() || form.password.is_empty() {
        return render_signup(Some(MISSING_FIELDS));
    }

    let store = CredentialStore::new(&state.db);
    match store.create(&form.email, &form.name, &form.password).await {
        Ok(user) => {
            info!(user_id = %user.id, "user registered");
            Ok(Redirect::to("/login").into_response())
        }
        Err(AuthError::DuplicateEmail) => {
            warn!(email = %form.email, "signup rejected, email taken");
            render_signup(Some(DUPLICATE_EMAIL))
        }
        Err(err) => {
            error!(error = %err, "signup failed");
            Err(err.into())
        }
    }
}

pub async fn login_form() -> Result<Response, WebError> {
    render_login(None)
}

#[instrument(skip(state, jar, form))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, WebError> {
    let store = CredentialStore::new(&state.db);
    match store.verify(&form.email, &form.password).await {
        Ok(Some(user)) => {
            let keys = SessionKeys::from_ref(&state);
            let cookie = keys.establish(&user)?;
            info!(user_id = %user.id, "user logged in");
            Ok((jar.add(cookie), Redirect::to("/profile")).into_response())
        }
        Ok(None) => {
            warn!(email = %form.email, "login rejected");
            render_login(Some(BAD_CREDENTIALS))
        }
        Err(err) => {
            error!(error = %err, "login failed");
            Err(err.into())
        }
    }
}

pub async fn profile(CurrentUser(user): CurrentUser) -> Result<Response, WebError> {
    let page = ProfileTemplate {
        name: user.name,
        email: user.email,
    };
    Ok(Html(page.render()?).into_response())
}

#[instrument(skip(jar))]
pub async fn logout(jar: CookieJar) -> Response {
    (jar.remove(SessionKeys::clear()), Redirect::to("/")).into_response()
}

fn render_signup(error: Option<&str>) -> Result<Response, WebError> {
    let page = SignupTemplate {
        error: error.map(str::to_string),
    };
    Ok(Html(page.render()?).into_response())
}

fn render_login(error: Option<&str>) -> Result<Response, WebError> {
    let page = LoginTemplate {
        error: error.map(str::to_string),
    };
    Ok(Html(page.render()?).into_response())
}
