//! brushnote web server and UI.
//!
//! This crate provides the Leptos-based web interface for the brushnote
//! writing platform, including the WeChat scan-to-login flow.

#![allow(non_snake_case)]

pub mod app;
pub mod net;
pub mod pages;
pub mod types;
pub mod user;

#[cfg(feature = "ssr")]
pub mod auth;
#[cfg(feature = "ssr")]
pub mod config;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
