use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Build state from the process environment.
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        Self::connect(config).await
    }

    /// Connect to the database named by `config`, applying migrations.
    ///
    /// In-memory databases get a single-connection pool so the schema does
    /// not vanish between checkouts; tests rely on this for isolated
    /// instances.
    pub async fn connect(config: Arc<AppConfig>) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .context("parse DATABASE_URL")?
            .create_if_missing(true)
            .foreign_keys(true);

        let max_connections = if config.database_url.contains(":memory:") {
            1
        } else {
            10
        };
        let db = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .context("connect to database")?;

        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .context("run migrations")?;

        Ok(Self { db, config })
    }

    pub fn from_parts(db: SqlitePool, config: Arc<AppConfig>) -> Self {
        Self { db, config }
    }
}
