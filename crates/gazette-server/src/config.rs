use std::path::PathBuf;

use gazette_core::AppError;

/// Process-level server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub production: bool,
    pub public_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Read configuration from environment variables.
    ///
    /// - `GAZETTE_PORT` (optional, defaults to 3000)
    /// - `GAZETTE_ENV` (optional; `production` enables `Secure` cookies)
    /// - `GAZETTE_PUBLIC_DIR` (optional directory holding the built front-end)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(
            std::env::var("GAZETTE_PORT").ok(),
            std::env::var("GAZETTE_ENV").ok(),
            std::env::var("GAZETTE_PUBLIC_DIR").ok(),
        )
    }

    fn from_vars(
        port: Option<String>,
        env: Option<String>,
        public_dir: Option<String>,
    ) -> Result<Self, AppError> {
        let port = match port {
            None => 3000,
            Some(raw) => raw.parse().map_err(|_| {
                AppError::ConfigError(format!("Invalid GAZETTE_PORT '{raw}': must be a port number"))
            })?,
        };
        let production = env.is_some_and(|e| e.eq_ignore_ascii_case("production"));
        let public_dir = public_dir.filter(|d| !d.is_empty()).map(PathBuf::from);

        Ok(Self {
            port,
            production,
            public_dir,
        })
    }
}
