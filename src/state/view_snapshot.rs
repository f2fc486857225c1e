//! Renderable snapshot of the whole view state

use serde::{Deserialize, Serialize};

use super::{SelectionState, TimerState};
use crate::utils::format_elapsed;

/// Everything the presentation layer needs to render the stopwatch and the
/// feature grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    pub timer: TimerState,
    pub selection: SelectionState,
    /// Stopwatch readout in `MM:SS`
    pub display: String,
}

impl ViewSnapshot {
    pub fn new(timer: TimerState, selection: SelectionState) -> Self {
        Self {
            display: format_elapsed(timer.elapsed_seconds),
            timer,
            selection,
        }
    }
}

impl Default for ViewSnapshot {
    fn default() -> Self {
        Self::new(TimerState::new(), SelectionState::new())
    }
}
