use crate::config::{AppConfig, AppMode, DatabaseConfig};
use crate::db::{Database, PostgresDatabase, SqliteDatabase};
use anyhow::Result;
use std::sync::{Arc, OnceLock};

/// Global application state containing all service implementations
pub struct AppState {
    pub db: Arc<dyn Database>,
    pub config: AppConfig,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("mode", &self.config.mode)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create AppState from configuration
    ///
    /// Initializes the database for the selected mode and applies
    /// migrations before the first request is served.
    pub async fn from_config(config: AppConfig) -> Result<Self> {
        // Required for sqlx::Any pools; without this, AnyPoolOptions panics at runtime.
        sqlx::any::install_default_drivers();

        match config.mode {
            AppMode::Local => tracing::info!("App Mode: LOCAL"),
            AppMode::Production => tracing::info!("App Mode: PRODUCTION"),
        }

        let db: Arc<dyn Database> = match &config.database {
            DatabaseConfig::PostgreSQL { url } => {
                tracing::info!("Connecting to PostgreSQL...");
                let postgres = PostgresDatabase::connect(url).await?;
                postgres.run_migrations().await?;
                tracing::info!("PostgreSQL connected and migrations applied");
                Arc::new(postgres)
            }
            DatabaseConfig::SQLite { path } => {
                tracing::info!("Connecting to SQLite: {}", path);
                let sqlite = SqliteDatabase::connect(path).await?;
                sqlite.run_migrations().await?;
                tracing::info!("SQLite connected and migrations applied");
                Arc::new(sqlite)
            }
        };

        Ok(Self { db, config })
    }

    /// Set the global AppState instance
    ///
    /// This should be called once at server startup.
    /// Panics if called more than once.
    pub fn set_global(state: Arc<Self>) {
        STATE
            .set(state)
            .expect("AppState::set_global called more than once");
    }

    /// Get the global AppState instance
    ///
    /// Panics if called before set_global.
    pub fn global() -> Arc<Self> {
        // In tests, check thread-local state first
        if let Some(test_state) = TEST_STATE.with(|s| s.borrow().clone()) {
            return test_state;
        }

        STATE
            .get()
            .expect("AppState::global called before set_global")
            .clone()
    }
}

/// Global state storage using OnceLock for thread-safe initialization
pub(crate) static STATE: OnceLock<Arc<AppState>> = OnceLock::new();

thread_local! {
    /// Thread-local state override for testing
    pub(crate) static TEST_STATE: std::cell::RefCell<Option<Arc<AppState>>> = const { std::cell::RefCell::new(None) };
}
