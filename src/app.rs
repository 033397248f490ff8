//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::guard::{ProtectedRoute, PublicOnlyRoute};
use crate::components::notice_banner::NoticeBanner;
use crate::config::ClientConfig;
use crate::net::http::HttpClient;
use crate::net::transport::default_transport;
use crate::pages::home::{AdminPage, DashboardPage, HomeRedirect, ModerationPage};
use crate::pages::login::LoginPage;
use crate::pages::register::RegisterPage;
use crate::state::notice::NoticeState;
use crate::state::session::SessionStore;
use crate::util::guard::{ADMIN_ROLES, MODERATION_ROLES, USER_DASHBOARD_ROLES};
use crate::util::navigation::BrowserNavigator;
use crate::util::storage::{LocalStorage, SessionStorage};

/// Build the session store for this tab: browser storage, fetch transport,
/// and `window.location` for the 401 redirect.
fn build_session_store(config: &ClientConfig) -> Arc<SessionStore> {
    let storage = SessionStorage::new(Arc::new(LocalStorage));
    let http = Arc::new(HttpClient::new(config, default_transport(), Arc::new(BrowserNavigator), storage.clone()));
    Arc::new(SessionStore::new(http, storage))
}

/// Root application component.
///
/// Provides the session store, a reactive mirror of its state, and the
/// notice slot, then sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_env();
    log::debug!("api base url: {}", config.api_base_url);

    let store = build_session_store(&config);
    let session = RwSignal::new(store.snapshot());
    store.subscribe(move |s| session.set(s.clone()));
    let notices = RwSignal::new(NoticeState::default());

    provide_context(store);
    provide_context(session);
    provide_context(notices);

    view! {
        <Title text="Sejiwa"/>

        <Router>
            <NoticeBanner/>
            <main>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomeRedirect/>
                    <Route
                        path=StaticSegment("login")
                        view=|| view! { <PublicOnlyRoute><LoginPage/></PublicOnlyRoute> }
                    />
                    <Route
                        path=StaticSegment("register")
                        view=|| view! { <PublicOnlyRoute><RegisterPage/></PublicOnlyRoute> }
                    />
                    <Route
                        path=StaticSegment("dashboard")
                        view=|| view! { <ProtectedRoute allowed=USER_DASHBOARD_ROLES.to_vec()><DashboardPage/></ProtectedRoute> }
                    />
                    <Route
                        path=StaticSegment("moderation")
                        view=|| {
                            view! {
                                <ProtectedRoute allowed=MODERATION_ROLES.to_vec()>
                                    <ModerationPage/>
                                </ProtectedRoute>
                            }
                        }
                    />
                    <Route
                        path=StaticSegment("admin")
                        view=|| view! { <ProtectedRoute allowed=ADMIN_ROLES.to_vec()><AdminPage/></ProtectedRoute> }
                    />
                </Routes>
            </main>
        </Router>
    }
}
