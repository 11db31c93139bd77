use std::sync::Arc;

use axum::extract::State;
use axum::http::header::LOCATION;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use chrono::Utc;

use gazette_core::AppError;
use gazette_core::guard::{RouteDecision, is_guarded, route_decision};
use gazette_core::session::{SESSION_COOKIE_NAME, SessionClaims};

use crate::error::ApiError;
use crate::state::AppState;

/// Raw `admin_session` token from the request cookies.
fn session_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    Some(jar.get(SESSION_COOKIE_NAME)?.value().to_string())
}

/// The verified session carried by a request, if any.
///
/// Missing, malformed, tampered and expired tokens all yield `None`.
pub fn current_session(state: &AppState, headers: &HeaderMap) -> Option<SessionClaims> {
    let token = session_token(headers)?;
    match state.sessions.verify(&token, Utc::now()) {
        Ok(claims) => Some(claims),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring session cookie");
            None
        }
    }
}

/// `Set-Cookie` value carrying a freshly issued session token.
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}

/// Middleware that redirects page requests based on the admin session.
///
/// Unauthenticated `/admin` requests go to `/login`; authenticated `/login`
/// requests go to `/admin`. API and static asset paths are left alone.
pub async fn session_guard(
    State(state): State<Arc<AppState>>,
    request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let path = request.uri().path();
    if !is_guarded(path) {
        return next.run(request).await;
    }

    let authenticated = current_session(&state, request.headers()).is_some();
    match route_decision(path, authenticated) {
        RouteDecision::Pass => next.run(request).await,
        RouteDecision::Redirect(target) => {
            tracing::debug!(%path, %target, "Session guard redirect");
            (StatusCode::FOUND, [(LOCATION, target)]).into_response()
        }
    }
}

/// Middleware that rejects requests without a valid admin session.
///
/// On success the [`SessionClaims`] are stored in the request extensions.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    match current_session(&state, request.headers()) {
        Some(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        None => ApiError(AppError::Unauthorized(
            "Missing or invalid admin session".to_string(),
        ))
        .into_response(),
    }
}
