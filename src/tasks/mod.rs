//! Background tasks module
//! 
//! This module contains background tasks that run alongside the HTTP server.

pub mod stopwatch_ticker;

// Re-export main functions
pub use stopwatch_ticker::{spawn_ticker, TickerHandle};
