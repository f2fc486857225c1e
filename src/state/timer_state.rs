//! Stopwatch state structure and transitions

use serde::{Deserialize, Serialize};

/// Stopwatch state: whole seconds accumulated while running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub elapsed_seconds: u64,
    pub is_running: bool,
}

impl TimerState {
    /// Create a stopped timer at zero
    pub fn new() -> Self {
        Self {
            elapsed_seconds: 0,
            is_running: false,
        }
    }

    /// Mark the timer as running. Returns true if it was paused before.
    pub fn start(&mut self) -> bool {
        let was_paused = !self.is_running;
        self.is_running = true;
        was_paused
    }

    /// Mark the timer as paused. Returns true if it was running before.
    pub fn pause(&mut self) -> bool {
        let was_running = self.is_running;
        self.is_running = false;
        was_running
    }

    /// Flip the running flag and return the new value
    pub fn toggle_run(&mut self) -> bool {
        self.is_running = !self.is_running;
        self.is_running
    }

    /// Back to zero and stopped
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Advance by one second. Only meaningful while running; the scheduler
    /// is the one that guarantees this.
    pub fn tick(&mut self) {
        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
    }

    /// Check if the timer is running
    pub fn is_running(&self) -> bool {
        self.is_running
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_and_pause_are_idempotent() {
        let mut timer = TimerState::new();
        assert!(timer.start());
        assert!(!timer.start());
        assert!(timer.is_running());

        assert!(timer.pause());
        assert!(!timer.pause());
        assert!(!timer.is_running());
    }

    #[test]
    fn toggle_flips_running_flag() {
        let mut timer = TimerState::new();
        assert!(timer.toggle_run());
        assert!(!timer.toggle_run());
    }

    #[test]
    fn reset_clears_any_prior_state() {
        let mut timer = TimerState {
            elapsed_seconds: 4242,
            is_running: true,
        };
        timer.reset();
        assert_eq!(timer, TimerState::new());

        timer.reset();
        assert_eq!(timer.elapsed_seconds, 0);
        assert!(!timer.is_running);
    }

    #[test]
    fn tick_adds_exactly_one() {
        let mut timer = TimerState::new();
        timer.start();
        for _ in 0..7 {
            timer.tick();
        }
        assert_eq!(timer.elapsed_seconds, 7);
    }
}
