use std::sync::LazyLock;

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use chrono::{DateTime, Utc};
use gazette_core::error::AppError;
use gazette_core::models::AdminUser;
use gazette_core::traits::UserStore;
use sqlx::{PgPool, Pool, Postgres};

/// Hash checked against when the email is unknown, so a miss costs as much
/// as a wrong password.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| UserRepository::hash_password("gazette-dummy-password").ok());

/// Reject credentials that could never be used to log in.
fn validate_credentials(email: &str, password: &str) -> Result<(), AppError> {
    if email.trim().is_empty() {
        return Err(AppError::Validation("email must not be empty".into()));
    }
    if password.is_empty() {
        return Err(AppError::Validation("password must not be empty".into()));
    }
    Ok(())
}

/// Repository for administrator accounts. Passwords are stored as Argon2id hashes.
#[derive(Clone)]
pub struct UserRepository {
    pool: Pool<Postgres>,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Hash a password using Argon2id.
    pub fn hash_password(password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Generic(format!("Failed to hash password: {e}")))?;
        Ok(hash.to_string())
    }

    /// Verify a password against a stored hash. Unparseable hashes never match.
    pub fn verify_password(password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Create an administrator. Fails if the email is already taken.
    pub async fn create(&self, email: &str, password: &str) -> Result<AdminUser, AppError> {
        validate_credentials(email, password)?;
        let password_hash = Self::hash_password(password)?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO admin_users (email, password_hash)
            VALUES ($1, $2)
            RETURNING email, password_hash, created_at, last_login
            "#,
        )
        .bind(email)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Validation(format!("User already exists: {email}"))
            }
            other => AppError::DatabaseError(other.to_string()),
        })?;

        tracing::info!(%email, "Administrator created");
        Ok(row.into())
    }

    pub async fn find(&self, email: &str) -> Result<Option<AdminUser>, AppError> {
        Ok(self.find_row(email).await?.map(Into::into))
    }

    pub async fn list(&self) -> Result<Vec<AdminUser>, AppError> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT email, password_hash, created_at, last_login FROM admin_users ORDER BY email",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Check credentials; on success the login time is recorded and the
    /// updated user returned.
    pub async fn login(&self, email: &str, password: &str) -> Result<Option<AdminUser>, AppError> {
        let Some(row) = self.find_row(email).await? else {
            if let Some(dummy) = DUMMY_HASH.as_deref() {
                Self::verify_password(password, dummy);
            }
            tracing::debug!(%email, "Login for unknown administrator");
            return Ok(None);
        };
        if !Self::verify_password(password, &row.password_hash) {
            tracing::debug!(%email, "Login with wrong password");
            return Ok(None);
        }

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE admin_users SET last_login = NOW()
            WHERE email = $1
            RETURNING email, password_hash, created_at, last_login
            "#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(Some(row.into()))
    }

    async fn find_row(&self, email: &str) -> Result<Option<UserRow>, AppError> {
        sqlx::query_as::<_, UserRow>(
            "SELECT email, password_hash, created_at, last_login FROM admin_users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct UserRow {
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    last_login: Option<DateTime<Utc>>,
}

impl From<UserRow> for AdminUser {
    fn from(row: UserRow) -> Self {
        AdminUser {
            email: row.email,
            created_at: row.created_at,
            last_login: row.last_login,
        }
    }
}

// -- Trait implementation --

impl UserStore for UserRepository {
    async fn login(&self, email: &str, password: &str) -> Result<Option<AdminUser>, AppError> {
        UserRepository::login(self, email, password).await
    }
}
