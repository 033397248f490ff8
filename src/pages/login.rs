//! Login page: username + password against `POST /auth/login`.
//!
//! On success the surrounding `PublicOnlyRoute` sees the new session and
//! leaves this page; on failure the server's message is shown verbatim.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::session::SessionStore;
use crate::util::guard::REGISTER_ROUTE;

pub(crate) const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please check your username and password.";
const MISSING_FIELDS_MESSAGE: &str = "Enter both username and password.";

/// Trim the username and require both fields. Passwords are sent as typed.
pub(crate) fn validate_login_input(username: &str, password: &str) -> Result<(String, String), &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(MISSING_FIELDS_MESSAGE);
    }
    Ok((username.to_owned(), password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let store = expect_context::<Arc<SessionStore>>();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (user_value, pass_value) = match validate_login_input(&username.get(), &password.get()) {
            Ok(values) => values,
            Err(msg) => {
                error.set(Some(msg.to_owned()));
                return;
            }
        };
        error.set(None);
        busy.set(true);

        #[cfg(feature = "csr")]
        {
            let store = store.clone();
            leptos::task::spawn_local(async move {
                if let Err(e) = store.login(&user_value, &pass_value).await {
                    error.set(Some(e.user_message(LOGIN_FAILED_MESSAGE)));
                    password.set(String::new());
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&store, user_value, pass_value);
            busy.set(false);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Sejiwa"</h1>
                <p class="auth-card__subtitle">"Sign in anonymously"</p>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="text"
                        autocomplete="username"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <Show when=move || error.get().is_some()>
                    <p class="auth-message auth-message--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <p class="auth-card__footer">
                    "No account yet? "
                    <A href=REGISTER_ROUTE>"Create one"</A>
                </p>
            </div>
        </div>
    }
}
