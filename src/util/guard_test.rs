use super::*;

// =============================================================
// decide / compute_redirect
// =============================================================

#[test]
fn decide_without_role_redirects_to_login_for_any_allow_list() {
    assert_eq!(decide(None, &[]), Decision::RedirectLogin);
    assert_eq!(decide(None, &[Role::User]), Decision::RedirectLogin);
    assert_eq!(decide(None, &Role::ALL), Decision::RedirectLogin);
}

#[test]
fn decide_renders_iff_role_is_allowed() {
    let allow_lists: [&[Role]; 5] = [
        &[],
        &[Role::User],
        &[Role::Moderator, Role::Admin],
        &[Role::Admin],
        &Role::ALL,
    ];
    for allowed in allow_lists {
        for role in Role::ALL {
            let decision = decide(Some(role), allowed);
            assert_eq!(decision == Decision::Render, allowed.contains(&role), "{role} in {allowed:?}");
        }
    }
}

#[test]
fn decide_mismatch_redirects_to_role_default() {
    for role in Role::ALL {
        assert_eq!(
            decide(Some(role), &[]),
            Decision::RedirectRoleDefault(default_route_for_role(role))
        );
    }
}

#[test]
fn default_route_for_role_is_closed_mapping() {
    assert_eq!(default_route_for_role(Role::Admin), "/admin");
    assert_eq!(default_route_for_role(Role::Moderator), "/moderation");
    assert_eq!(default_route_for_role(Role::User), "/dashboard");
}

#[test]
fn compute_redirect_scenarios() {
    assert_eq!(compute_redirect(None, &[Role::User]), Some("/login"));
    assert_eq!(compute_redirect(Some(Role::Admin), &[Role::User]), Some("/admin"));
    assert_eq!(compute_redirect(Some(Role::Moderator), &[Role::Moderator]), None);
    assert_eq!(compute_redirect(Some(Role::User), &[Role::User]), None);
}

// =============================================================
// public_only_redirect
// =============================================================

#[test]
fn public_only_renders_for_anonymous() {
    assert_eq!(public_only_redirect(None), None);
}

#[test]
fn public_only_sends_sessions_home() {
    assert_eq!(public_only_redirect(Some(Role::User)), Some("/dashboard"));
    assert_eq!(public_only_redirect(Some(Role::Admin)), Some("/admin"));
}

// =============================================================
// is_auth_route
// =============================================================

#[test]
fn is_auth_route_matches_login_and_register() {
    assert!(is_auth_route("/login"));
    assert!(is_auth_route("/register"));
    assert!(is_auth_route("/login/"));
    assert!(is_auth_route("/login?from=%2Fadmin"));
}

#[test]
fn is_auth_route_rejects_other_paths() {
    assert!(!is_auth_route("/"));
    assert!(!is_auth_route("/dashboard"));
    assert!(!is_auth_route("/login-help"));
    assert!(!is_auth_route("/categories/login"));
}

// =============================================================
// Return-to handling
// =============================================================

#[test]
fn login_redirect_path_encodes_attempted_path() {
    assert_eq!(login_redirect_path("/categories"), "/login?from=%2Fcategories");
    assert_eq!(
        login_redirect_path("/threads/42?page=2"),
        "/login?from=%2Fthreads%2F42%3Fpage%3D2"
    );
}

#[test]
fn login_redirect_path_skips_root_and_auth_pages() {
    assert_eq!(login_redirect_path("/"), "/login");
    assert_eq!(login_redirect_path(""), "/login");
    assert_eq!(login_redirect_path("/register"), "/login");
}

#[test]
fn public_only_target_is_none_for_anonymous() {
    assert_eq!(public_only_target(None, Some("/categories")), None);
}

#[test]
fn public_only_target_uses_safe_return_path() {
    assert_eq!(public_only_target(Some(Role::User), Some("/categories")), Some("/categories".to_owned()));
}

#[test]
fn public_only_target_rejects_unsafe_targets() {
    let user = Some(Role::User);
    assert_eq!(public_only_target(user, Some("https://evil.test")).as_deref(), Some("/dashboard"));
    assert_eq!(public_only_target(user, Some("//evil.test")).as_deref(), Some("/dashboard"));
    assert_eq!(public_only_target(user, Some("/\\evil.test")).as_deref(), Some("/dashboard"));
    assert_eq!(public_only_target(user, Some("/\t/evil.test")).as_deref(), Some("/dashboard"));
    assert_eq!(public_only_target(user, Some("/\n/evil.test")).as_deref(), Some("/dashboard"));
    assert_eq!(public_only_target(user, Some("/\r\n/evil.test")).as_deref(), Some("/dashboard"));
    assert_eq!(public_only_target(user, Some("/ /evil.test")).as_deref(), Some("/dashboard"));
    assert_eq!(public_only_target(Some(Role::Moderator), Some("/login")).as_deref(), Some("/moderation"));
    assert_eq!(public_only_target(Some(Role::Admin), None).as_deref(), Some("/admin"));
}

#[test]
fn login_redirect_path_drops_paths_with_control_characters() {
    assert_eq!(login_redirect_path("/\t/evil.test"), "/login");
}

#[test]
fn public_only_target_drops_return_path_outside_role_allow_list() {
    assert_eq!(public_only_target(Some(Role::User), Some("/admin")).as_deref(), Some("/dashboard"));
    assert_eq!(public_only_target(Some(Role::User), Some("/moderation/queue")).as_deref(), Some("/dashboard"));
    assert_eq!(public_only_target(Some(Role::Admin), Some("/admin/users")).as_deref(), Some("/admin/users"));
    assert_eq!(public_only_target(Some(Role::Admin), Some("/moderation")).as_deref(), Some("/moderation"));
}

// =============================================================
// allowed_roles_for
// =============================================================

#[test]
fn allowed_roles_for_matches_guarded_sections() {
    assert_eq!(allowed_roles_for("/dashboard"), Some(USER_DASHBOARD_ROLES));
    assert_eq!(allowed_roles_for("/moderation/reports?page=2"), Some(MODERATION_ROLES));
    assert_eq!(allowed_roles_for("/admin"), Some(ADMIN_ROLES));
}

#[test]
fn allowed_roles_for_ignores_unguarded_paths() {
    assert_eq!(allowed_roles_for("/categories"), None);
    assert_eq!(allowed_roles_for("/administrivia"), None);
    assert_eq!(allowed_roles_for("/"), None);
}

// =============================================================
// protected_redirect
// =============================================================

#[test]
fn protected_redirect_renders_without_navigation() {
    assert_eq!(protected_redirect(Decision::Render, "/dashboard", false), None);
}

#[test]
fn protected_redirect_remembers_attempted_path_on_logout() {
    assert_eq!(
        protected_redirect(Decision::RedirectLogin, "/dashboard", false).as_deref(),
        Some("/login?from=%2Fdashboard")
    );
}

#[test]
fn protected_redirect_leaves_eviction_to_http_client() {
    assert_eq!(protected_redirect(Decision::RedirectLogin, "/dashboard", true), None);
}

#[test]
fn protected_redirect_role_mismatch_ignores_eviction_flag() {
    let decision = Decision::RedirectRoleDefault("/admin");
    assert_eq!(protected_redirect(decision, "/dashboard", true).as_deref(), Some("/admin"));
}
