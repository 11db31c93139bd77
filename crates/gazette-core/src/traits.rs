use std::future::Future;

use crate::error::AppError;
use crate::models::{AdminUser, Category, SiteSetting};

/// Key/value persistence for site-wide settings.
pub trait SettingsStore: Send + Sync + Clone {
    /// Read a setting. `None` means the key has never been written.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, AppError>> + Send;

    /// Insert or overwrite a setting.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), AppError>> + Send;

    /// All settings, ordered by key.
    fn list(&self) -> impl Future<Output = Result<Vec<SiteSetting>, AppError>> + Send;
}

/// Credential check against the administrator store.
pub trait UserStore: Send + Sync + Clone {
    /// Returns the user when the email exists and the password matches.
    fn login(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Option<AdminUser>, AppError>> + Send;
}

/// Source of categories (the upstream CMS).
pub trait CategorySource: Send + Sync + Clone {
    /// Every category the CMS lists, in upstream order.
    fn categories(&self) -> impl Future<Output = Result<Vec<Category>, AppError>> + Send;
}
