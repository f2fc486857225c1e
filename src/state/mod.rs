//! State management module
//! 
//! This module contains the stopwatch and selection state and the controller
//! that owns them.

pub mod app_state;
pub mod selection_state;
pub mod timer_state;
pub mod view_snapshot;

// Re-export main types
pub use app_state::AppState;
pub use selection_state::{FeatureId, SelectionState};
pub use timer_state::TimerState;
pub use view_snapshot::ViewSnapshot;
