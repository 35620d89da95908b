//! Gatehouse - a small authentication service.
//!
//! User registration, Argon2 password storage, cookie-session login and a
//! protected profile page, served over axum with SQLite persistence.

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod state;
pub mod web;

pub use config::{AppConfig, SessionConfig};
pub use error::{AuthError, WebError};
pub use state::AppState;
