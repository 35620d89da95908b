use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    /// Login identifier, unique across all users. Stored exactly as
    /// submitted.
    pub email: String,
    /// Display label, arbitrary content. Escaping is the template layer's
    /// job.
    pub name: String,
    /// Argon2 PHC string, never exposed in JSON.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

/// Capability set the session guard needs from an authenticated principal.
pub trait Identity {
    /// Session subject, stable across requests.
    fn id(&self) -> Uuid;

    /// Whether this principal counts as logged in. A persisted user always
    /// does.
    fn is_authenticated(&self) -> bool {
        true
    }
}

impl Identity for User {
    fn id(&self) -> Uuid {
        self.id
    }
}
