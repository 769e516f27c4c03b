//! State Management
//!
//! Global dashboard state and the browser-backed lead-flag store.

pub mod global;
pub mod storage;

pub use global::{provide_global_state, GlobalState};
pub use storage::LocalStore;
