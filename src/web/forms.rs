use serde::Deserialize;

/// Form body for `POST /signup`.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Form body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}
