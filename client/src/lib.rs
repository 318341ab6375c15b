//! # webwindow-client
//!
//! Browser side of the webwindow protocol: one websocket session that
//! negotiates a rendering channel, routes inbound frames between a status
//! line and a canvas panel, and closes the page when the link drops.
//!
//! The protocol core (`net`) is plain Rust and tested natively. The Leptos
//! shell and the gloo-net driver are compiled with the `csr` feature.

pub mod app;
pub mod components;
pub mod net;
pub mod state;

/// WASM entry point: mount the page.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("console logger not installed: {e}");
    }
    leptos::mount::mount_to_body(app::App);
}
