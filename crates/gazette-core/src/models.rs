use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Settings key holding the site-wide maintenance flag (`"true"` / `"false"`).
pub const MAINTENANCE_MODE_KEY: &str = "maintenance_mode";

/// Settings key holding the headline shown on the maintenance page.
pub const MAINTENANCE_TITLE_KEY: &str = "maintenance_title";

/// A single row of the key/value settings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSetting {
    pub key: String,
    pub value: String,
}

/// Parse a stored `maintenance_mode` value.
///
/// Only `"true"` (ignoring surrounding whitespace and ASCII case) enables
/// maintenance; absent or malformed values fall back to disabled.
pub fn parse_flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

/// Render a flag the way it is persisted.
pub fn flag_value(enabled: bool) -> &'static str {
    if enabled { "true" } else { "false" }
}

/// Result of evaluating the maintenance gate for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaintenanceStatus {
    pub maintenance_mode: bool,
    pub is_admin: bool,
    pub should_redirect: bool,
}

impl MaintenanceStatus {
    pub fn new(maintenance_mode: bool, is_admin: bool) -> Self {
        Self {
            maintenance_mode,
            is_admin,
            should_redirect: maintenance_mode && !is_admin,
        }
    }
}

/// Both maintenance-related settings, as read by admins and the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceSettings {
    pub enabled: bool,
    pub title: Option<String>,
}

/// A WordPress category as exposed by the public API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub count: u64,
}

/// An administrator account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUser {
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}
