pub mod guard;
pub mod password;
pub mod session;
pub mod store;
mod user;

pub use guard::{CurrentUser, Visitor};
pub use session::{SessionKeys, SESSION_COOKIE};
pub use store::CredentialStore;
pub use user::{Identity, User};
