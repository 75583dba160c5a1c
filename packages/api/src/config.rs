#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Local,
    Production,
}

impl AppMode {
    pub fn from_env() -> Self {
        match std::env::var("APP_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "local" => AppMode::Local,
            _ => AppMode::Production, // Default to production for safety
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseConfig {
    PostgreSQL { url: String },
    SQLite { path: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub mode: AppMode,
    pub database: DatabaseConfig,
    pub jwt_secret: String,
}

impl AppConfig {
    /// Build the configuration from the process environment.
    ///
    /// Local mode falls back to an on-disk SQLite database and a fixed
    /// development JWT secret so the app runs with zero setup. Production
    /// requires DATABASE_URL and JWT_SECRET to be present.
    pub fn from_env() -> Result<Self, String> {
        let mode = AppMode::from_env();

        let database = match std::env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => DatabaseConfig::PostgreSQL { url },
            _ => match mode {
                AppMode::Local => DatabaseConfig::SQLite {
                    path: ".dev/local.db".to_string(),
                },
                AppMode::Production => {
                    return Err("DATABASE_URL must be set in production".to_string())
                }
            },
        };

        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if secret.len() >= 32 => secret,
            Ok(_) => return Err("JWT_SECRET must be at least 32 characters".to_string()),
            Err(_) => match mode {
                AppMode::Local => "bricol-local-dev-secret-not-for-production".to_string(),
                AppMode::Production => {
                    return Err("JWT_SECRET must be set in production".to_string())
                }
            },
        };

        Ok(Self {
            mode,
            database,
            jwt_secret,
        })
    }
}

/// Best-effort .env loading for local development.
#[cfg(feature = "server")]
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_mode_defaults_to_production() {
        std::env::remove_var("APP_MODE");
        assert_eq!(AppMode::from_env(), AppMode::Production);
    }

    #[test]
    fn test_app_mode_local() {
        std::env::set_var("APP_MODE", "local");
        assert_eq!(AppMode::from_env(), AppMode::Local);
        std::env::remove_var("APP_MODE");
    }

    #[test]
    fn test_app_mode_case_insensitive() {
        std::env::set_var("APP_MODE", "LOCAL");
        assert_eq!(AppMode::from_env(), AppMode::Local);
        std::env::remove_var("APP_MODE");
    }

    #[test]
    fn test_local_config_needs_no_env() {
        std::env::set_var("APP_MODE", "local");
        std::env::remove_var("DATABASE_URL");
        std::env::remove_var("JWT_SECRET");
        let config = AppConfig::from_env().expect("local config");
        assert_eq!(config.mode, AppMode::Local);
        assert!(matches!(config.database, DatabaseConfig::SQLite { .. }));
        std::env::remove_var("APP_MODE");
    }
}
