use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gazette API",
        version = "0.1.0",
        description = "News site backend: maintenance gate, admin sessions and CMS category proxy."
    ),
    paths(
        crate::routes::maintenance_status,
        crate::routes::get_maintenance_settings,
        crate::routes::update_maintenance_settings,
        crate::routes::list_categories,
        crate::routes::login,
        crate::routes::logout,
        crate::routes::current_user,
        crate::routes::health,
    ),
    components(schemas(
        crate::dto::MaintenanceResponse,
        crate::dto::UpdateMaintenanceRequest,
        crate::dto::MaintenanceSettingsResponse,
        crate::dto::CategoryResponse,
        crate::dto::CategoryListResponse,
        crate::dto::LoginRequest,
        crate::dto::LoginResponse,
        crate::dto::UserResponse,
        crate::dto::SessionUser,
        crate::dto::SessionResponse,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "maintenance", description = "Maintenance-mode gate and settings"),
        (name = "content", description = "Content proxied from WordPress"),
        (name = "auth", description = "Admin login and sessions"),
        (name = "system", description = "Health and system status"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Adds the session cookie security scheme to the OpenAPI spec.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session",
                utoipa::openapi::security::SecurityScheme::ApiKey(
                    utoipa::openapi::security::ApiKey::Cookie(
                        utoipa::openapi::security::ApiKeyValue::with_description(
                            "admin_session",
                            "Signed admin session token issued by POST /api/auth/login.",
                        ),
                    ),
                ),
            );
        }
    }
}
