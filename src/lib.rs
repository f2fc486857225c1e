//! Anchor demo - view-state server for the Anchor landing page
//! 
//! This library owns the stopwatch and feature selection state behind the
//! landing page demo and serves it over a small HTTP API.

pub mod config;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, ViewSnapshot};
pub use api::create_router;
pub use utils::{format_elapsed, shutdown_signal};
