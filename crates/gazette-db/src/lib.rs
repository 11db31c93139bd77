pub mod config;
pub mod database;
pub mod settings_repository;
pub mod user_repository;

pub use config::DatabaseConfig;
pub use database::Database;
pub use settings_repository::SettingsRepository;
pub use user_repository::UserRepository;
