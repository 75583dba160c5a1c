use crate::types::{Me, RegistrationProfile, Role, Session, User};
use dioxus::prelude::ServerFnError;

#[cfg(feature = "server")]
mod server {
    use super::*;
    use anyhow::Context;
    use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
    use sqlx::{Any, Pool, Row};
    use uuid::Uuid;

    #[derive(Debug, serde::Serialize, serde::Deserialize)]
    struct Claims {
        sub: String,
        iss: String,
        role: String,
        exp: usize,
        iat: usize,
    }

    pub fn generate_jwt(secret: &str, user_id: Uuid, role: Role) -> Result<String, anyhow::Error> {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)?
            .as_secs() as usize;

        let exp = now + (30 * 24 * 60 * 60); // 30 days

        let claims = Claims {
            sub: user_id.to_string(),
            iss: "bricol".to_string(),
            role: role.as_db().to_string(),
            exp,
            iat: now,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )?;

        tracing::debug!("auth.generate_jwt: user_id={}", user_id);
        Ok(token)
    }

    pub fn verify_jwt(secret: &str, token: &str) -> Result<(Uuid, Role), anyhow::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&["bricol"]);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )?;

        let user_id = Uuid::parse_str(&token_data.claims.sub)?;
        let role = Role::from_db(&token_data.claims.role)
            .context("jwt carries an unknown role claim")?;
        tracing::debug!("auth.verify_jwt: user_id={}", user_id);
        Ok((user_id, role))
    }

    pub fn validate_password(password: &str) -> Result<(), anyhow::Error> {
        if password.len() < 8 {
            return Err(anyhow::anyhow!("Password must be at least 8 characters"));
        }
        if !password.chars().any(|c| c.is_uppercase()) {
            return Err(anyhow::anyhow!(
                "Password must contain at least one uppercase letter"
            ));
        }
        if !password.chars().any(|c| c.is_lowercase()) {
            return Err(anyhow::anyhow!(
                "Password must contain at least one lowercase letter"
            ));
        }
        if !password.chars().any(|c| c.is_numeric()) {
            return Err(anyhow::anyhow!("Password must contain at least one number"));
        }
        Ok(())
    }

    /// Customers log in with an email; workers with a phone number.
    pub fn validate_login(login: &str, role: Role) -> Result<(), anyhow::Error> {
        match role {
            Role::Customer => {
                if !login.contains('@') || login.len() < 3 {
                    return Err(anyhow::anyhow!("Invalid email address"));
                }
            }
            Role::Worker => {
                let digits = login.strip_prefix('+').unwrap_or(login);
                if !(8..=15).contains(&digits.len())
                    || !digits.chars().all(|c| c.is_ascii_digit())
                {
                    return Err(anyhow::anyhow!("Invalid phone number"));
                }
            }
        }
        Ok(())
    }

    pub fn hash_password(password: &str) -> Result<String, anyhow::Error> {
        use argon2::password_hash::SaltString;
        use argon2::{Argon2, PasswordHasher};

        let argon2 = Argon2::default();
        let salt = SaltString::generate(&mut rand::thread_rng());
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Password hashing failed: {e}"))?
            .to_string();
        Ok(hash)
    }

    pub fn verify_password(password: &str, hash: &str) -> Result<(), anyhow::Error> {
        use argon2::{Argon2, PasswordHash, PasswordVerifier};

        let parsed = PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("bad hash: {e}"))?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| anyhow::anyhow!("Invalid login or password"))
    }

    /// Truncated, non-identifying label for logs.
    pub fn login_label(login: &str) -> String {
        match login.split_once('@') {
            Some((_, domain)) => format!("{domain} (len={})", login.len()),
            None => format!("phone (len={})", login.len()),
        }
    }

    pub async fn load_user(pool: &Pool<Any>, user_id: Uuid) -> Result<User, ServerFnError> {
        let row = sqlx::query(
            "select id, login, full_name, phone, role, created_at from users where id = $1",
        )
        .bind(crate::db::uuid_to_db(user_id))
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?
        .ok_or_else(|| ServerFnError::new("User not found"))?;

        user_from_row(&row)
    }

    pub fn user_from_row(row: &sqlx::any::AnyRow) -> Result<User, ServerFnError> {
        let role_str: String = row.get("role");
        Ok(User {
            id: crate::db::uuid_from_db(&row.get::<String, _>("id"))?,
            login: row.get("login"),
            full_name: row.get("full_name"),
            phone: row.get("phone"),
            role: Role::from_db(&role_str)
                .ok_or_else(|| ServerFnError::new(format!("unknown role in db: {role_str}")))?,
            created_at: crate::db::datetime_from_db(&row.get::<String, _>("created_at"))?,
        })
    }

    #[cfg(test)]
    mod password_tests {
        use super::*;

        #[test]
        fn test_validate_password_accepts_strong_password() {
            assert!(validate_password("Passw0rd").is_ok());
            assert!(validate_password("MyP@ssw0rd123").is_ok());
        }

        #[test]
        fn test_validate_password_rejects_short() {
            let result = validate_password("Pass1");
            assert!(result.is_err());
            assert!(result.unwrap_err().to_string().contains("8 characters"));
        }

        #[test]
        fn test_validate_password_rejects_no_uppercase() {
            let result = validate_password("password1");
            assert!(result.is_err());
            assert!(result.unwrap_err().to_string().contains("uppercase"));
        }

        #[test]
        fn test_validate_password_rejects_no_number() {
            let result = validate_password("Password");
            assert!(result.is_err());
            assert!(result.unwrap_err().to_string().contains("number"));
        }

        #[test]
        fn test_hash_then_verify_roundtrip() {
            let hash = hash_password("Passw0rd").unwrap();
            assert!(verify_password("Passw0rd", &hash).is_ok());
            assert!(verify_password("wrong", &hash).is_err());
        }
    }


    #[cfg(test)]
    mod login_tests {
        use super::*;

        #[test]
        fn test_customer_login_is_an_email() {
            assert!(validate_login("ali@example.com", Role::Customer).is_ok());
            assert!(validate_login("0612345678", Role::Customer).is_err());
        }

        #[test]
        fn test_worker_login_is_a_phone() {
            assert!(validate_login("0612345678", Role::Worker).is_ok());
            assert!(validate_login("+212612345678", Role::Worker).is_ok());
            assert!(validate_login("ali@example.com", Role::Worker).is_err());
            assert!(validate_login("123", Role::Worker).is_err());
        }
    }
}

/// Register a new account and sign it in.
///
/// The profile is the full draft accumulated by the registration wizard;
/// its role tag decides which side table (`customers` / `workers`) gets the
/// extra row. The returned session token is ready for storage.
#[dioxus::prelude::post("/api/auth/signup")]
pub async fn sign_up(
    login: String,
    password: String,
    profile: RegistrationProfile,
) -> Result<Session, ServerFnError> {
    #[cfg(not(feature = "server"))]
    {
        let _ = (login, password, profile);
        Err(ServerFnError::new("sign_up is server-only"))
    }

    #[cfg(feature = "server")]
    {
        use uuid::Uuid;

        let state = crate::state::AppState::global();
        let role = profile.role();
        tracing::info!(
            "auth.sign_up: role={} login={}",
            role.as_db(),
            server::login_label(&login)
        );

        server::validate_login(&login, role).map_err(|e| ServerFnError::new(e.to_string()))?;
        server::validate_password(&password).map_err(|e| ServerFnError::new(e.to_string()))?;

        let pool = state.db.pool().await;

        // Duplicate check first so the caller gets a targeted message.
        let existing = sqlx::query("select 1 as one from users where login = $1")
            .bind(&login)
            .fetch_optional(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;

        if existing.is_some() {
            tracing::info!("auth.sign_up: login already registered");
            return Err(ServerFnError::new("This account is already registered"));
        }

        let password_hash =
            server::hash_password(&password).map_err(|e| ServerFnError::new(e.to_string()))?;

        let user_id = Uuid::new_v4();
        let created_at = time::OffsetDateTime::now_utc();
        let created_at_str = crate::db::datetime_to_db(created_at)?;

        sqlx::query(
            "insert into users (id, login, password_hash, full_name, phone, role, created_at) \
             values ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(crate::db::uuid_to_db(user_id))
        .bind(&login)
        .bind(&password_hash)
        .bind(profile.full_name())
        .bind(profile.phone())
        .bind(role.as_db())
        .bind(&created_at_str)
        .execute(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

        match &profile {
            RegistrationProfile::Customer { city, address, .. } => {
                sqlx::query("insert into customers (id, city, address) values ($1, $2, $3)")
                    .bind(crate::db::uuid_to_db(user_id))
                    .bind(city)
                    .bind(address)
                    .execute(pool)
                    .await
                    .map_err(|e| ServerFnError::new(e.to_string()))?;
            }
            RegistrationProfile::Worker {
                whatsapp,
                experience_years,
                category,
                availability,
                ..
            } => {
                sqlx::query(
                    "insert into workers (id, whatsapp, experience_years, category, availability) \
                     values ($1, $2, $3, $4, $5)",
                )
                .bind(crate::db::uuid_to_db(user_id))
                .bind(whatsapp.as_deref())
                .bind(*experience_years)
                .bind(category.as_db())
                .bind(availability.as_db())
                .execute(pool)
                .await
                .map_err(|e| ServerFnError::new(e.to_string()))?;
            }
        }

        tracing::info!("auth.sign_up: user created user_id={}", user_id);

        // Mirror the original flow: a successful registration signs the
        // account straight in.
        let token = server::generate_jwt(&state.config.jwt_secret, user_id, role)
            .map_err(|e| ServerFnError::new(format!("Failed to generate token: {e}")))?;

        let user = server::load_user(pool, user_id).await?;
        Ok(Session {
            token,
            user,
            user_type: role,
        })
    }
}

/// Sign in with an email (customers) or phone number (workers).
#[dioxus::prelude::post("/api/auth/signin")]
pub async fn sign_in(login: String, password: String) -> Result<Session, ServerFnError> {
    #[cfg(not(feature = "server"))]
    {
        let _ = (login, password);
        Err(ServerFnError::new("sign_in is server-only"))
    }

    #[cfg(feature = "server")]
    {
        use sqlx::Row;

        let state = crate::state::AppState::global();
        let pool = state.db.pool().await;
        tracing::info!("auth.sign_in: login={}", server::login_label(&login));

        let row = sqlx::query("select id, password_hash, role from users where login = $1")
            .bind(&login)
            .fetch_optional(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;

        let row = row.ok_or_else(|| ServerFnError::new("Invalid login or password"))?;

        let user_id = crate::db::uuid_from_db(&row.get::<String, _>("id"))?;
        let password_hash: String = row.get("password_hash");
        let role_str: String = row.get("role");
        let role = crate::types::Role::from_db(&role_str)
            .ok_or_else(|| ServerFnError::new(format!("unknown role in db: {role_str}")))?;

        server::verify_password(&password, &password_hash)
            .map_err(|_| ServerFnError::new("Invalid login or password"))?;

        let token = server::generate_jwt(&state.config.jwt_secret, user_id, role)
            .map_err(|e| ServerFnError::new(format!("Failed to generate token: {e}")))?;

        let user = server::load_user(pool, user_id).await?;
        tracing::info!("auth.sign_in: success user_id={}", user_id);
        Ok(Session {
            token,
            user,
            user_type: role,
        })
    }
}

/// Resolve the signed-in account from a session token.
#[dioxus::prelude::post("/api/auth/me")]
pub async fn auth_me(token: String) -> Result<Me, ServerFnError> {
    #[cfg(not(feature = "server"))]
    {
        let _ = token;
        Err(ServerFnError::new("auth_me is server-only"))
    }

    #[cfg(feature = "server")]
    {
        use sqlx::Row;

        let state = crate::state::AppState::global();
        tracing::debug!("auth.auth_me: token_len={}", token.len());

        let (user_id, role) = server::verify_jwt(&state.config.jwt_secret, &token)
            .map_err(|e| ServerFnError::new(format!("auth: {e:#}")))?;

        let pool = state.db.pool().await;
        let user = server::load_user(pool, user_id).await?;

        let mut me = Me {
            user,
            category: None,
            availability: None,
            city: None,
        };

        match role {
            crate::types::Role::Customer => {
                if let Some(row) = sqlx::query("select city from customers where id = $1")
                    .bind(crate::db::uuid_to_db(user_id))
                    .fetch_optional(pool)
                    .await
                    .map_err(|e| ServerFnError::new(e.to_string()))?
                {
                    me.city = Some(row.get("city"));
                }
            }
            crate::types::Role::Worker => {
                if let Some(row) =
                    sqlx::query("select category, availability from workers where id = $1")
                        .bind(crate::db::uuid_to_db(user_id))
                        .fetch_optional(pool)
                        .await
                        .map_err(|e| ServerFnError::new(e.to_string()))?
                {
                    let category: String = row.get("category");
                    let availability: String = row.get("availability");
                    me.category = crate::types::ServiceCategory::from_db(&category);
                    me.availability = crate::types::Availability::from_db(&availability);
                }
            }
        }

        Ok(me)
    }
}
