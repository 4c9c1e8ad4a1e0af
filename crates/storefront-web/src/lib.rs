//! Storefront Web Frontend
//!
//! Leptos-based WASM pricing page. Prices sync from the storefront server
//! after first paint; plan buttons start hosted checkouts.

mod api;
mod app;
mod components;
mod pages;

pub use api::HttpStorefront;
pub use app::App;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
