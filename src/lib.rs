//! # sejiwa-client
//!
//! Leptos + WASM session and access-control layer for the Sejiwa anonymous
//! discussion platform.
//!
//! This crate holds the persisted session store, the REST client wrapper
//! that injects bearer tokens and evicts the session on 401, the observable
//! session container behind login/register/logout, and the role-based route
//! guards with the screens they protect.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
