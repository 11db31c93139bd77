//! Path-based admin route guard.

/// Login page; authenticated visitors are bounced to the dashboard.
pub const LOGIN_PATH: &str = "/login";

/// Admin dashboard root; everything under it requires a session.
pub const ADMIN_PATH: &str = "/admin";

/// Path prefixes the guard never looks at (API and static assets).
const EXCLUDED_PREFIXES: &[&str] = &["/api/", "/static/", "/assets/"];
const EXCLUDED_EXACT: &[&str] = &["/api", "/favicon.ico"];

/// What the guard wants done with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Pass,
    Redirect(&'static str),
}

/// Whether a path is subject to the guard at all.
pub fn is_guarded(path: &str) -> bool {
    !(EXCLUDED_EXACT.contains(&path) || EXCLUDED_PREFIXES.iter().any(|p| path.starts_with(p)))
}

fn is_admin_path(path: &str) -> bool {
    path.strip_prefix(ADMIN_PATH)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Decide how to route a request given its path and whether it carries a valid session.
pub fn route_decision(path: &str, authenticated: bool) -> RouteDecision {
    if !is_guarded(path) {
        return RouteDecision::Pass;
    }
    if is_admin_path(path) && !authenticated {
        return RouteDecision::Redirect(LOGIN_PATH);
    }
    if path == LOGIN_PATH && authenticated {
        return RouteDecision::Redirect(ADMIN_PATH);
    }
    RouteDecision::Pass
}
