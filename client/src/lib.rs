//! # client
//!
//! Leptos + WASM frontend for the Qring smart-doorbell web app.
//!
//! This crate holds the browser-side session store, the auth coordinator that
//! talks to the external Qring REST API, the route authorization gate, and the
//! pages that sit on top of them. State logic compiles without the `hydrate`
//! or `ssr` features so it can be unit-tested natively.

pub mod app;
pub mod auth;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(test)]
pub(crate) mod testing;

/// Browser entry point: install panic/log hooks and hydrate the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
