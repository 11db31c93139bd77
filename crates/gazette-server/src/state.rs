use std::path::PathBuf;

use gazette_client::WordPressClient;
use gazette_core::SessionKeys;
use gazette_db::Database;

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
pub struct AppState {
    pub db: Database,
    pub sessions: SessionKeys,
    pub wordpress: WordPressClient,
    /// Mark the session cookie `Secure` (production deployments behind HTTPS).
    pub secure_cookies: bool,
    /// Built front-end served for every path the API does not handle.
    pub public_dir: Option<PathBuf>,
}
