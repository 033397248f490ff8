//! Role landing pages and the `/` dispatcher.
//!
//! These are the redirect targets of the route guards. Feature screens
//! (categories, threads, moderation queues, account admin) hang off them.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::session::{Session, SessionStore};
use crate::util::guard::{LOGIN_ROUTE, public_only_redirect};

/// `/`: send the visitor to their landing page, or to login.
#[component]
pub fn HomeRedirect() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let navigate = use_navigate();

    Effect::new(move || {
        let target = public_only_redirect(session.with(Session::role)).unwrap_or(LOGIN_ROUTE);
        navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
    });
}

#[component]
fn LandingShell(title: &'static str, blurb: &'static str) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let store = expect_context::<Arc<SessionStore>>();

    let username = move || session.with(|s| s.user.as_ref().map(|u| u.username.clone()).unwrap_or_default());
    let role = move || session.with(|s| s.role().map(|r| r.to_string()).unwrap_or_default());

    // The route guard reacts to the cleared session and redirects to login.
    let on_logout = move |_| store.logout();

    view! {
        <section class="landing">
            <header class="landing__header">
                <h1>{title}</h1>
                <span class="landing__user">{username}" · "{role}</span>
                <button class="landing__logout" on:click=on_logout>"Log out"</button>
            </header>
            <p class="landing__blurb">{blurb}</p>
        </section>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! { <LandingShell title="Dashboard" blurb="Browse categories and join the discussion."/> }
}

#[component]
pub fn ModerationPage() -> impl IntoView {
    view! { <LandingShell title="Moderation" blurb="Review reported threads and replies."/> }
}

#[component]
pub fn AdminPage() -> impl IntoView {
    view! { <LandingShell title="Administration" blurb="Manage accounts, roles, and categories."/> }
}
