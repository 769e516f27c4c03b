//! API Module
//!
//! HTTP calls to the Prodesk backend.

pub mod client;

pub use client::*;
