//! Ebebek Carousel Library
//!
//! A "products you might like" carousel injected under the hero banner of
//! the e-bebek homepage. Everything except [`dom`] is target independent and
//! exercised by the native test suite; `dom` wires it to the browser.

pub mod app;
pub mod cache;
pub mod carousel;
pub mod config;
pub mod data;
pub mod interaction;
pub mod lifecycle;
pub mod logging;
pub mod page;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod dom;

/// Module start hook: installs the panic hook and mounts the carousel
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    dom::mount_carousel();
}
