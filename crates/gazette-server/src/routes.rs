use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Router, middleware};
use chrono::Utc;
use tower_http::services::{ServeDir, ServeFile};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use gazette_core::auth::{self, LoginOutcome};
use gazette_core::session::SessionClaims;
use gazette_core::{AppError, CategoryService, MaintenanceService};

use crate::auth::{clear_session_cookie, current_session, require_session, session_cookie, session_guard};
use crate::dto::{
    CategoryListResponse, CategoryResponse, ErrorResponse, HealthResponse, LoginRequest,
    LoginResponse, MaintenanceResponse, MaintenanceSettingsResponse, SessionResponse, SessionUser,
    UpdateMaintenanceRequest,
};
use crate::error::ApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Build the full router with all routes and middleware.
pub fn router(state: Arc<AppState>) -> Router {
    let admin = Router::new()
        .route(
            "/api/admin/maintenance",
            get(get_maintenance_settings).put(update_maintenance_settings),
        )
        .route("/api/auth/session", get(current_user))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    let public = Router::new()
        .route("/health", get(health))
        .route("/api/maintenance", get(maintenance_status))
        .route("/api/categories", get(list_categories))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let app = public.merge(admin);
    let app = match &state.public_dir {
        // Single-page front-end: unknown paths get index.html so the client router takes over.
        Some(dir) => app.fallback_service(
            ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html"))),
        ),
        None => app.fallback(not_found),
    };

    app.layer(middleware::from_fn_with_state(
        state.clone(),
        session_guard,
    ))
    .with_state(state)
}

async fn not_found() -> impl IntoResponse {
    let body = ErrorResponse {
        error: "not_found".to_string(),
        message: "No such page".to_string(),
    };
    (StatusCode::NOT_FOUND, axum::Json(body))
}

// ---------------------------------------------------------------------------
// Maintenance
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/maintenance",
    responses(
        (status = 200, description = "Maintenance gate decision", body = MaintenanceResponse),
        (status = 500, description = "Settings store unavailable", body = ErrorResponse),
    ),
    tag = "maintenance"
)]
pub async fn maintenance_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let is_admin = current_session(&state, &headers).is_some();
    let status = MaintenanceService::new(state.db.settings_repo())
        .status(is_admin)
        .await?;

    Ok(axum::Json(MaintenanceResponse::from(status)))
}

#[utoipa::path(
    get,
    path = "/api/admin/maintenance",
    responses(
        (status = 200, description = "Current maintenance settings", body = MaintenanceSettingsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    security(("session" = [])),
    tag = "maintenance"
)]
pub async fn get_maintenance_settings(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let settings = MaintenanceService::new(state.db.settings_repo())
        .settings()
        .await?;

    Ok(axum::Json(MaintenanceSettingsResponse::from(settings)))
}

#[utoipa::path(
    put,
    path = "/api/admin/maintenance",
    request_body = UpdateMaintenanceRequest,
    responses(
        (status = 200, description = "Updated maintenance settings", body = MaintenanceSettingsResponse),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    security(("session" = [])),
    tag = "maintenance"
)]
pub async fn update_maintenance_settings(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<SessionClaims>,
    body: Result<axum::Json<UpdateMaintenanceRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let axum::Json(body) = body.map_err(|e| AppError::Validation(e.body_text()))?;

    let settings = MaintenanceService::new(state.db.settings_repo())
        .update(body.enabled, body.title.as_deref())
        .await?;
    tracing::info!(admin = %claims.sub, enabled = body.enabled, "Maintenance mode changed via API");

    Ok(axum::Json(MaintenanceSettingsResponse::from(settings)))
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Categories with at least one post", body = CategoryListResponse),
        (status = 500, description = "CMS unavailable", body = ErrorResponse),
    ),
    tag = "content"
)]
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let categories = CategoryService::new(state.wordpress.clone())
        .published()
        .await?;

    let response = CategoryListResponse {
        categories: categories.into_iter().map(CategoryResponse::from).collect(),
    };

    Ok(axum::Json(response))
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; sets the admin_session cookie", body = LoginResponse),
        (status = 400, description = "Missing email or password", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<axum::Json<LoginRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let axum::Json(body) = body.map_err(|e| AppError::Validation(e.body_text()))?;

    let LoginOutcome { user, token } = auth::login(
        &state.db.user_repo(),
        &state.sessions,
        body.email.as_deref(),
        body.password.as_deref(),
        Utc::now(),
    )
    .await?;
    let cookie = session_cookie(&token, state.sessions.ttl_secs(), state.secure_cookies);

    let response = LoginResponse { user: user.into() };
    Ok(([(SET_COOKIE, cookie)], axum::Json(response)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 204, description = "Session cookie cleared"),
    ),
    tag = "auth"
)]
pub async fn logout(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [(SET_COOKIE, clear_session_cookie(state.secure_cookies))],
    )
}

#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Current admin session", body = SessionResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    security(("session" = [])),
    tag = "auth"
)]
pub async fn current_user(Extension(claims): Extension<SessionClaims>) -> impl IntoResponse {
    let expires_at = claims.expires_at();
    axum::Json(SessionResponse {
        user: SessionUser { email: claims.sub },
        expires_at,
    })
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let db_ok = state.db.health_check().await.is_ok();

    let status = if db_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = HealthResponse {
        status: if db_ok { "healthy" } else { "unhealthy" },
        database: if db_ok { "ok" } else { "error" },
    };

    (status, axum::Json(response))
}
