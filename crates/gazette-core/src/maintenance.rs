use crate::error::AppError;
use crate::models::{
    MAINTENANCE_MODE_KEY, MAINTENANCE_TITLE_KEY, MaintenanceSettings, MaintenanceStatus,
    flag_value, parse_flag,
};
use crate::traits::SettingsStore;

/// Reads and writes the maintenance-mode settings through a [`SettingsStore`].
#[derive(Clone)]
pub struct MaintenanceService<S: SettingsStore> {
    store: S,
}

impl<S: SettingsStore> MaintenanceService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Whether maintenance mode is on. Unset or malformed values read as off.
    pub async fn is_enabled(&self) -> Result<bool, AppError> {
        let value = self.store.get(MAINTENANCE_MODE_KEY).await?;
        Ok(parse_flag(value.as_deref()))
    }

    /// Evaluate the gate for a visitor.
    pub async fn status(&self, is_admin: bool) -> Result<MaintenanceStatus, AppError> {
        let enabled = self.is_enabled().await?;
        Ok(MaintenanceStatus::new(enabled, is_admin))
    }

    pub async fn settings(&self) -> Result<MaintenanceSettings, AppError> {
        let enabled = self.is_enabled().await?;
        let title = self.store.get(MAINTENANCE_TITLE_KEY).await?;
        Ok(MaintenanceSettings { enabled, title })
    }

    /// Turn maintenance on or off, optionally replacing the title.
    ///
    /// A `None` title leaves the stored title untouched.
    pub async fn update(
        &self,
        enabled: bool,
        title: Option<&str>,
    ) -> Result<MaintenanceSettings, AppError> {
        self.store
            .set(MAINTENANCE_MODE_KEY, flag_value(enabled))
            .await?;
        if let Some(title) = title {
            self.store.set(MAINTENANCE_TITLE_KEY, title).await?;
        }
        tracing::info!(enabled, "Maintenance mode updated");
        self.settings().await
    }
}
