//! Route-access decisions for protected and public-only screens.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything here is pure so it can be tested without a rendering host.
//! `components::guard` adapts these decisions to `leptos_router` redirects.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::net::types::Role;

pub const LOGIN_ROUTE: &str = "/login";
pub const REGISTER_ROUTE: &str = "/register";
pub const ADMIN_HOME_ROUTE: &str = "/admin";
pub const MODERATION_HOME_ROUTE: &str = "/moderation";
pub const USER_DASHBOARD_ROUTE: &str = "/dashboard";

/// Allow-lists of the guarded landing routes.
pub const USER_DASHBOARD_ROLES: &[Role] = &[Role::User];
pub const MODERATION_ROLES: &[Role] = &[Role::Moderator, Role::Admin];
pub const ADMIN_ROLES: &[Role] = &[Role::Admin];

const GUARDED_ROUTES: [(&str, &[Role]); 3] = [
    (USER_DASHBOARD_ROUTE, USER_DASHBOARD_ROLES),
    (MODERATION_HOME_ROUTE, MODERATION_ROLES),
    (ADMIN_HOME_ROUTE, ADMIN_ROLES),
];

/// Query parameter carrying the path a redirected visitor originally asked for.
pub const RETURN_TO_PARAM: &str = "from";

/// Outcome of checking a session against a route's allow-list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Render,
    RedirectLogin,
    RedirectRoleDefault(&'static str),
}

/// Landing route for each role.
#[must_use]
pub fn default_route_for_role(role: Role) -> &'static str {
    match role {
        Role::Admin => ADMIN_HOME_ROUTE,
        Role::Moderator => MODERATION_HOME_ROUTE,
        Role::User => USER_DASHBOARD_ROUTE,
    }
}

/// `None` role means no session.
#[must_use]
pub fn decide(role: Option<Role>, allowed: &[Role]) -> Decision {
    match role {
        None => Decision::RedirectLogin,
        Some(role) if !allowed.contains(&role) => Decision::RedirectRoleDefault(default_route_for_role(role)),
        Some(_) => Decision::Render,
    }
}

/// Redirect target for a protected route, or `None` to render it.
#[must_use]
pub fn compute_redirect(role: Option<Role>, allowed: &[Role]) -> Option<&'static str> {
    match decide(role, allowed) {
        Decision::Render => None,
        Decision::RedirectLogin => Some(LOGIN_ROUTE),
        Decision::RedirectRoleDefault(target) => Some(target),
    }
}

/// Navigation a protected route performs for `decision`, or `None` to stay.
///
/// After a 401 eviction the HTTP client has already sent the browser to
/// login, so the guard does not navigate a second time.
#[must_use]
pub fn protected_redirect(decision: Decision, attempted: &str, evicted: bool) -> Option<String> {
    match decision {
        Decision::Render => None,
        Decision::RedirectLogin if evicted => None,
        Decision::RedirectLogin => Some(login_redirect_path(attempted)),
        Decision::RedirectRoleDefault(target) => Some(target.to_owned()),
    }
}

/// Allow-list of the guarded route that owns `path`, `None` if unguarded.
#[must_use]
pub fn allowed_roles_for(path: &str) -> Option<&'static [Role]> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    GUARDED_ROUTES
        .into_iter()
        .find(|(route, _)| path.strip_prefix(route).is_some_and(|rest| rest.is_empty() || rest.starts_with('/')))
        .map(|(_, roles)| roles)
}

/// Redirect target for login/register screens: signed-in sessions go home.
#[must_use]
pub fn public_only_redirect(role: Option<Role>) -> Option<&'static str> {
    role.map(default_route_for_role)
}

/// Public-only redirect that honours a return-to path.
///
/// Used after login/registration: the new session leaves the auth screen
/// for `from` when it is a safe local path the role may open, else for the
/// role default. A `from` left by an earlier session with another role is
/// dropped.
#[must_use]
pub fn public_only_target(role: Option<Role>, from: Option<&str>) -> Option<String> {
    let role = role?;
    match from {
        Some(path) if is_safe_return_path(path) && allowed_roles_for(path).is_none_or(|roles| roles.contains(&role)) => {
            Some(path.to_owned())
        }
        _ => Some(default_route_for_role(role).to_owned()),
    }
}

/// Whether `path` is the login or registration screen.
#[must_use]
pub fn is_auth_route(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let path = if path.len() > 1 { path.trim_end_matches('/') } else { path };
    path == LOGIN_ROUTE || path == REGISTER_ROUTE
}

/// Login URL that remembers `attempted` so login can return to it.
#[must_use]
pub fn login_redirect_path(attempted: &str) -> String {
    if attempted.is_empty() || attempted == "/" || !is_safe_return_path(attempted) {
        return LOGIN_ROUTE.to_owned();
    }
    format!("{LOGIN_ROUTE}?{RETURN_TO_PARAM}={}", urlencoding::encode(attempted))
}

/// Local absolute path only. URL parsers drop tab and newline characters,
/// so any control or whitespace character is refused.
fn is_safe_return_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.contains('\\')
        && !path.chars().any(|c| c.is_control() || c.is_whitespace())
        && !is_auth_route(path)
}
