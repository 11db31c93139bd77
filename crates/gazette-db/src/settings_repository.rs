use gazette_core::error::AppError;
use gazette_core::models::SiteSetting;
use gazette_core::traits::SettingsStore;
use sqlx::{PgPool, Pool, Postgres};

/// Repository for the `site_settings` key/value table.
#[derive(Clone)]
pub struct SettingsRepository {
    pool: Pool<Postgres>,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM site_settings WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(|(value,)| value))
    }

    /// Insert or overwrite a setting. One row per key is kept.
    pub async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO site_settings (key, value, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (key) DO UPDATE
            SET value = EXCLUDED.value, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<SiteSetting>, AppError> {
        let rows = sqlx::query_as::<_, SettingRow>(
            "SELECT key, value FROM site_settings ORDER BY key",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct SettingRow {
    key: String,
    value: String,
}

impl From<SettingRow> for SiteSetting {
    fn from(row: SettingRow) -> Self {
        SiteSetting {
            key: row.key,
            value: row.value,
        }
    }
}

// -- Trait implementation --

impl SettingsStore for SettingsRepository {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        SettingsRepository::get(self, key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        SettingsRepository::set(self, key, value).await
    }

    async fn list(&self) -> Result<Vec<SiteSetting>, AppError> {
        SettingsRepository::list(self).await
    }
}
