//! Askama template definitions.
//!
//! All user-supplied values pass through askama's HTML escaping, so a name
//! containing markup renders as text.

use askama::Template;

/// Landing page.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub user_name: Option<String>,
}

/// Registration form, optionally re-displayed with an error message.
#[derive(Template)]
#[template(path = "signup.html")]
pub struct SignupTemplate {
    pub error: Option<String>,
}

/// Login form, optionally re-displayed with an error message.
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Profile page for the authenticated user.
#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub name: String,
    pub email: String,
}
