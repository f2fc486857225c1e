//! Recurring stopwatch tick task

use std::{sync::Weak, time::Duration};
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, error};

use crate::state::AppState;

/// Handle to a running tick schedule. Cancelling or dropping it stops the
/// schedule.
#[derive(Debug)]
pub struct TickerHandle {
    epoch: u64,
    task: JoinHandle<()>,
}

impl TickerHandle {
    /// Epoch of the schedule this handle controls
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Stop the schedule. No tick fires after this returns.
    pub fn cancel(self) {
        self.task.abort();
    }

    /// Whether the task has already exited
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawn a schedule that ticks `state` once per `period`, starting one full
/// period from now
pub fn spawn_ticker(state: Weak<AppState>, epoch: u64, period: Duration) -> TickerHandle {
    let task = tokio::spawn(stopwatch_ticker_task(state, epoch, period));
    TickerHandle { epoch, task }
}

/// Background task that ticks the stopwatch until its schedule goes stale or
/// the view is dropped
async fn stopwatch_ticker_task(state: Weak<AppState>, epoch: u64, period: Duration) {
    debug!("Starting tick schedule (epoch {}, period {:?})", epoch, period);

    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let Some(state) = state.upgrade() else {
            debug!("View dropped, stopping tick schedule (epoch {})", epoch);
            break;
        };

        match state.scheduled_tick(epoch) {
            Ok(true) => {}
            Ok(false) => {
                debug!("Tick schedule (epoch {}) is stale, stopping", epoch);
                break;
            }
            Err(e) => {
                error!("Failed to apply scheduled tick: {}", e);
                break;
            }
        }
    }
}
