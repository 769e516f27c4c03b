//! Pages
//!
//! Top-level page components for each route.

pub mod analytics;
pub mod clients;
pub mod overview;
pub mod settings;

pub use analytics::Analytics;
pub use clients::Clients;
pub use overview::Overview;
pub use settings::Settings;
