use anyhow::{Context, Result};
use dioxus::prelude::ServerFnError;
use sqlx::{Any, Pool};
use uuid::Uuid;

#[async_trait::async_trait]
pub trait Database: Send + Sync {
    async fn pool(&self) -> &Pool<Any>;

    async fn run_migrations(&self) -> Result<()>;
}

pub struct SqliteDatabase {
    pool: Pool<Any>,
}

impl SqliteDatabase {
    pub async fn connect(path: &str) -> Result<Self> {
        // Create the .dev directory if it doesn't exist
        if let Some(parent) = std::path::Path::new(path).parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create database directory")?;
        }

        let url = format!("sqlite:{}?mode=rwc", path);
        let pool = sqlx::any::AnyPoolOptions::new()
            .max_connections(1) // SQLite doesn't handle concurrent writes well
            .connect(&url)
            .await
            .context("Failed to connect to SQLite")?;

        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl Database for SqliteDatabase {
    async fn pool(&self) -> &Pool<Any> {
        &self.pool
    }

    async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run migrations")?;
        Ok(())
    }
}

pub struct PostgresDatabase {
    pool: Pool<Any>,
}

impl PostgresDatabase {
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = sqlx::any::AnyPoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
            .context("Failed to connect to PostgreSQL")?;

        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl Database for PostgresDatabase {
    async fn pool(&self) -> &Pool<Any> {
        &self.pool
    }

    async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run migrations")?;
        Ok(())
    }
}

/// Decode a UUID stored as text.
pub fn uuid_from_db(value: &str) -> Result<Uuid, ServerFnError> {
    Uuid::parse_str(value).map_err(|e| ServerFnError::new(format!("bad uuid in db: {e}")))
}

pub fn uuid_to_db(id: Uuid) -> String {
    id.to_string()
}

/// Decode an RFC 3339 timestamp stored as text.
pub fn datetime_from_db(value: &str) -> Result<time::OffsetDateTime, ServerFnError> {
    time::OffsetDateTime::parse(value, &time::format_description::well_known::Rfc3339)
        .map_err(|e| ServerFnError::new(format!("bad timestamp in db: {e}")))
}

pub fn datetime_to_db(value: time::OffsetDateTime) -> Result<String, ServerFnError> {
    value
        .format(&time::format_description::well_known::Rfc3339)
        .map_err(|e| ServerFnError::new(format!("format timestamp: {e}")))
}
