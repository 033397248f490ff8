//! Registration page. A successful registration signs the new account in.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::session::SessionStore;
use crate::util::guard::LOGIN_ROUTE;

pub(crate) const REGISTER_FAILED_MESSAGE: &str = "Registration failed. Please try a different username.";
pub(crate) const MIN_USERNAME_LEN: usize = 3;
pub(crate) const MAX_USERNAME_LEN: usize = 50;
pub(crate) const MIN_PASSWORD_LEN: usize = 8;

pub(crate) fn validate_register_input(
    username: &str,
    password: &str,
    confirm: &str,
) -> Result<(String, String), &'static str> {
    let username = username.trim();
    let len = username.chars().count();
    if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&len) {
        return Err("Username must be 3 to 50 characters.");
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err("Username may only contain letters, numbers, and underscores.");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 8 characters.");
    }
    if password != confirm {
        return Err("Passwords do not match.");
    }
    Ok((username.to_owned(), password.to_owned()))
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let store = expect_context::<Arc<SessionStore>>();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (user_value, pass_value) =
            match validate_register_input(&username.get(), &password.get(), &confirm.get()) {
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
                if let Err(e) = store.register(&user_value, &pass_value).await {
                    error.set(Some(e.user_message(REGISTER_FAILED_MESSAGE)));
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
                <h1>"Join Sejiwa"</h1>
                <p class="auth-card__subtitle">"No email, no real name. Just a handle."</p>
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
                        autocomplete="new-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        autocomplete="new-password"
                        placeholder="Confirm password"
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating account..." } else { "Create Account" }}
                    </button>
                </form>
                <Show when=move || error.get().is_some()>
                    <p class="auth-message auth-message--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <p class="auth-card__footer">
                    "Already registered? "
                    <A href=LOGIN_ROUTE>"Sign in"</A>
                </p>
            </div>
        </div>
    }
}
