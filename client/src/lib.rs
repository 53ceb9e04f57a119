//! # tripdesk-ui
//!
//! Leptos + WASM admin frontend for the TripDesk marketplace.
//!
//! This crate contains the pages, components and browser transport that
//! mount the generic entity table from the `entities` crate on every
//! `/{route_key}` list route.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(app::App);
}
