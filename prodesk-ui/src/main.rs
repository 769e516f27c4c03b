//! Prodesk Dashboard
//!
//! Admin dashboard for the Prodesk chatbot platform, built with Leptos (WASM).
//!
//! # Features
//!
//! - Tenant list with API-key copy
//! - New tenant creation
//! - Per-tenant chat analytics and lead export
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly and talks to the Prodesk API over HTTP.

use leptos::*;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <prodesk_ui::app::App /> });
}
