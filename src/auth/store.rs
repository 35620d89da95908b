//! Credential store: owns creation and verification of user credentials.

use sqlx::SqlitePool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password, PLACEHOLDER_HASH};
use crate::auth::user::User;
use crate::error::AuthError;

/// Repository over the users table.
///
/// All queries bind their inputs; email and name content is data, never
/// SQL.
pub struct CredentialStore<'a> {
    db: &'a SqlitePool,
}

impl<'a> CredentialStore<'a> {
    pub fn new(db: &'a SqlitePool) -> Self {
        Self { db }
    }

    /// Create a user with a freshly salted hash of `password`.
    ///
    /// Fails with [`AuthError::DuplicateEmail`] when the email is already
    /// registered; the existing record is untouched. Uniqueness under
    /// concurrent signups is the database constraint's job, so two racing
    /// inserts resolve to exactly one row.
    pub async fn create(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let password_hash = hash_password(password)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, name, password_hash)
            VALUES (?, ?, ?, ?)
            RETURNING id, email, name, password_hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(name)
        .bind(&password_hash)
        .fetch_one(self.db)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                warn!(email = %email, "signup with existing email");
                AuthError::DuplicateEmail
            } else {
                AuthError::Storage(err)
            }
        })?;

        debug!(user_id = %user.id, "user created");
        Ok(user)
    }

    /// Verify `password` against the account registered for `email`.
    ///
    /// Returns `Ok(None)` for an unknown email and for a wrong password
    /// alike; the miss path still pays one Argon2 pass so the two are not
    /// distinguishable by response time. No side effects on failure.
    pub async fn verify(&self, email: &str, password: &str) -> Result<Option<User>, AuthError> {
        let Some(user) = self.find_by_email(email).await? else {
            let _ = verify_password(password, PLACEHOLDER_HASH)?;
            return Ok(None);
        };

        if verify_password(password, &user.password_hash)? {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    /// Exact-match lookup by email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, password_hash, created_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(self.db)
        .await?;
        Ok(user)
    }

    /// Resolve a session subject back to its user record.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, password_hash, created_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db)
        .await?;
        Ok(user)
    }
}

/// Returns `true` when `err` is a database unique-constraint violation.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation)
        }
        _ => false,
    }
}
