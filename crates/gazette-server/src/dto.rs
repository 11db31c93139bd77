use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gazette_core::models::{AdminUser, Category, MaintenanceSettings, MaintenanceStatus};

// ---------------------------------------------------------------------------
// Maintenance
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceResponse {
    pub maintenance_mode: bool,
    pub is_admin: bool,
    /// `maintenanceMode && !isAdmin`
    pub should_redirect: bool,
}

impl From<MaintenanceStatus> for MaintenanceResponse {
    fn from(status: MaintenanceStatus) -> Self {
        Self {
            maintenance_mode: status.maintenance_mode,
            is_admin: status.is_admin,
            should_redirect: status.should_redirect,
        }
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateMaintenanceRequest {
    pub enabled: bool,
    /// Replaces the maintenance page headline when present
    pub title: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceSettingsResponse {
    pub maintenance_mode: bool,
    pub maintenance_title: Option<String>,
}

impl From<MaintenanceSettings> for MaintenanceSettingsResponse {
    fn from(settings: MaintenanceSettings) -> Self {
        Self {
            maintenance_mode: settings.enabled,
            maintenance_title: settings.title,
        }
    }
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CategoryResponse {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub count: u64,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            count: c.count,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CategoryListResponse {
    pub categories: Vec<CategoryResponse>,
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<AdminUser> for UserResponse {
    fn from(user: AdminUser) -> Self {
        Self {
            email: user.email,
            created_at: user.created_at,
            last_login: user.last_login,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub user: UserResponse,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SessionUser {
    pub email: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: SessionUser,
    pub expires_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
