//! Route wrappers that apply `util::guard` decisions through `leptos_router`.
//!
//! Redirects always replace the current history entry so the back button
//! never lands on a denied route.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate, use_query_map};

use crate::components::notice_banner::post_not_authorized;
use crate::net::types::Role;
use crate::state::notice::NoticeState;
use crate::state::session::{Session, SessionStore};
use crate::util::guard::{Decision, RETURN_TO_PARAM, decide, protected_redirect, public_only_target};

fn replace_options() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// Render `children` only for sessions whose role is in `allowed`.
///
/// Anonymous visitors go to login (remembering the path); signed-in users
/// with the wrong role go to their landing page with a notice. A session
/// evicted by a 401 is left to the HTTP client's own redirect.
#[component]
pub fn ProtectedRoute(allowed: Vec<Role>, children: ChildrenFn) -> impl IntoView {
    let store = expect_context::<Arc<SessionStore>>();
    let session = expect_context::<RwSignal<Session>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let location = use_location();
    let navigate = use_navigate();

    let decision = Memo::new(move |_| decide(session.with(Session::role), &allowed));

    Effect::new(move || {
        let decision = decision.get();
        let attempted = location.pathname.get_untracked();
        let Some(target) = protected_redirect(decision, &attempted, store.evicted()) else {
            return;
        };
        if matches!(decision, Decision::RedirectRoleDefault(_)) {
            post_not_authorized(notices);
        }
        navigate(&target, replace_options());
    });

    move || (decision.get() == Decision::Render).then(|| children())
}

/// Render `children` (login/register) only for anonymous visitors.
///
/// A session that appears here, including one just created by the wrapped
/// form, is sent to the remembered return-to path or its landing page.
#[component]
pub fn PublicOnlyRoute(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let query = use_query_map();
    let navigate = use_navigate();

    let target = Memo::new(move |_| {
        let from = query.with(|q| q.get(RETURN_TO_PARAM));
        public_only_target(session.with(Session::role), from.as_deref())
    });

    Effect::new(move || {
        if let Some(path) = target.get() {
            navigate(&path, replace_options());
        }
    });

    move || target.with(Option::is_none).then(|| children())
}
