use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::models::AdminUser;
use crate::session::SessionKeys;
use crate::traits::UserStore;

/// A successful login: the user plus a freshly minted session token.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: AdminUser,
    pub token: String,
}

/// Check credentials and mint a session token.
///
/// The email is trimmed; the password is used exactly as given. Missing or
/// empty fields are a validation error, rejected credentials are
/// `Unauthorized`.
pub async fn login<U: UserStore>(
    users: &U,
    keys: &SessionKeys,
    email: Option<&str>,
    password: Option<&str>,
    now: DateTime<Utc>,
) -> Result<LoginOutcome, AppError> {
    let email = email.map(str::trim).filter(|e| !e.is_empty());
    let password = password.filter(|p| !p.is_empty());
    let (Some(email), Some(password)) = (email, password) else {
        return Err(AppError::Validation(
            "Email and password are required".to_string(),
        ));
    };

    let Some(user) = users.login(email, password).await? else {
        tracing::warn!(%email, "Failed admin login");
        return Err(AppError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    };

    let token = keys.issue(&user.email, now)?;
    tracing::info!(email = %user.email, "Admin logged in");
    Ok(LoginOutcome { user, token })
}
