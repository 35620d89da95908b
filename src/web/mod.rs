use axum::{
    routing::get,
    Router,
};

use crate::state::AppState;

mod forms;
pub mod handlers;
mod templates;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::index))
        .route("/signup", get(handlers::signup_form).post(handlers::signup))
        .route("/login", get(handlers::login_form).post(handlers::login))
        .route("/profile", get(handlers::profile))
        .route("/logout", get(handlers::logout))
}
