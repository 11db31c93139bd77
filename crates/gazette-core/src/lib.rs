pub mod auth;
pub mod categories;
pub mod error;
pub mod guard;
pub mod maintenance;
pub mod models;
pub mod session;
pub mod traits;


pub use categories::CategoryService;
pub use error::AppError;
pub use maintenance::MaintenanceService;
pub use models::{AdminUser, Category, MaintenanceSettings, MaintenanceStatus, SiteSetting};
pub use session::{SessionClaims, SessionError, SessionKeys};
pub use traits::{CategorySource, SettingsStore, UserStore};
