//! # folioforge-web
//!
//! Leptos + WASM frontend for the FolioForge resume builder.
//!
//! This crate contains pages, components, the session/auth state machine,
//! and the HTTP gateway to the identity backend. Session lifecycle rules
//! (bootstrap, stale-response suppression, route guarding) live under
//! `state` and `util::guard`; pages are thin consumers.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: installs panic/log hooks and hydrates the app.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;

    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(App);
}
