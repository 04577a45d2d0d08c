//! ApiPulse Dashboard
//!
//! Live API monitoring dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Request and error statistics at a glance
//! - Per-endpoint health monitoring
//! - Response-time percentiles and charts
//! - Error tracking with live updates over WebSocket
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It communicates with the ApiPulse API via HTTP and WebSocket.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod routes;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
