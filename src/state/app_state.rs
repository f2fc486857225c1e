//! View-state controller

use std::{
    sync::{Arc, Mutex, MutexGuard, Weak},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{FeatureId, SelectionState, TimerState, ViewSnapshot};
use crate::{
    tasks::{spawn_ticker, TickerHandle},
    utils::format_uptime,
};

/// Mutable part of the view, kept behind one lock so user actions and
/// scheduled ticks never interleave
#[derive(Debug, Default)]
struct ViewModel {
    timer: TimerState,
    selection: SelectionState,
    /// Bumped every time a schedule is started or torn down. A ticker only
    /// counts while its epoch is current.
    epoch: u64,
    ticker: Option<TickerHandle>,
}

impl ViewModel {
    fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot::new(self.timer, self.selection)
    }

    fn cancel_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            debug!("Cancelling tick schedule (epoch {})", ticker.epoch());
            ticker.cancel();
        }
    }

    /// Replace any schedule with a fresh one under a new epoch
    fn schedule(&mut self, state: Weak<AppState>, period: Duration) {
        self.cancel_ticker();
        self.epoch += 1;
        info!("Stopwatch started at {}s", self.timer.elapsed_seconds);
        self.ticker = Some(spawn_ticker(state, self.epoch, period));
    }
}

/// Owns the stopwatch and the feature selection for the lifetime of a view
#[derive(Debug)]
pub struct AppState {
    view: Mutex<ViewModel>,
    /// Period between scheduled ticks
    pub tick_period: Duration,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Channel for view snapshot updates
    pub view_update_tx: watch::Sender<ViewSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    _view_update_rx: watch::Receiver<ViewSnapshot>,
}

impl AppState {
    /// Create a new AppState with a stopped timer and nothing selected
    pub fn new(port: u16, host: String, tick_period: Duration) -> Self {
        let (view_update_tx, view_update_rx) = watch::channel(ViewSnapshot::default());

        Self {
            view: Mutex::new(ViewModel::default()),
            tick_period,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            view_update_tx,
            _view_update_rx: view_update_rx,
        }
    }

    fn lock_view(&self) -> Result<MutexGuard<'_, ViewModel>, String> {
        self.view.lock()
            .map_err(|e| format!("Failed to lock view state: {}", e))
    }

    /// Push a snapshot to watchers. Called with the view lock held so
    /// watchers see updates in the order they were applied.
    fn publish(&self, snapshot: ViewSnapshot) {
        if let Err(e) = self.view_update_tx.send(snapshot) {
            warn!("Failed to send view update: {}", e);
        }
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Apply a user action to the view and notify watchers
    fn update_view<F>(&self, action: &str, updater: F) -> Result<ViewSnapshot, String>
    where
        F: FnOnce(&mut ViewModel),
    {
        let mut view = self.lock_view()?;
        updater(&mut view);
        let snapshot = view.snapshot();
        self.publish(snapshot.clone());
        drop(view);

        self.record_action(action);
        Ok(snapshot)
    }

    fn require_runtime() -> Result<(), String> {
        tokio::runtime::Handle::try_current()
            .map(|_| ())
            .map_err(|e| format!("No async runtime available to schedule ticks: {}", e))
    }

    /// Start the stopwatch. A fresh tick schedule is established only on the
    /// paused -> running transition.
    pub fn start(self: &Arc<Self>) -> Result<ViewSnapshot, String> {
        Self::require_runtime()?;

        let state = Arc::downgrade(self);
        let period = self.tick_period;
        self.update_view("start", move |view| {
            if view.timer.start() {
                view.schedule(state, period);
            } else {
                debug!("Stopwatch already running");
            }
        })
    }

    /// Pause the stopwatch and cancel its schedule
    pub fn pause(&self) -> Result<ViewSnapshot, String> {
        self.update_view("pause", |view| {
            if view.timer.pause() {
                info!("Stopwatch paused at {}s", view.timer.elapsed_seconds);
            } else {
                debug!("Stopwatch already paused");
            }
            view.cancel_ticker();
        })
    }

    /// Start when paused, pause when running. The flip happens under a single
    /// lock so concurrent toggles each see the previous one.
    pub fn toggle_run(self: &Arc<Self>) -> Result<ViewSnapshot, String> {
        Self::require_runtime()?;

        let state = Arc::downgrade(self);
        let period = self.tick_period;
        self.update_view("toggle", move |view| {
            if view.timer.toggle_run() {
                view.schedule(state, period);
            } else {
                info!("Stopwatch paused at {}s", view.timer.elapsed_seconds);
                view.cancel_ticker();
            }
        })
    }

    /// Zero the counter and stop, whatever the prior state
    pub fn reset(&self) -> Result<ViewSnapshot, String> {
        info!("Resetting stopwatch");
        self.update_view("reset", |view| {
            view.timer.reset();
            view.cancel_ticker();
        })
    }

    /// Advance the counter by one second. Callers must only do this while the
    /// stopwatch is running; the scheduler goes through `scheduled_tick`.
    pub fn tick(&self) -> Result<ViewSnapshot, String> {
        let mut view = self.lock_view()?;
        view.timer.tick();
        let snapshot = view.snapshot();
        self.publish(snapshot.clone());
        Ok(snapshot)
    }

    /// Tick on behalf of the schedule with the given epoch. Returns false once
    /// that schedule is stale, either paused or superseded.
    pub(crate) fn scheduled_tick(&self, epoch: u64) -> Result<bool, String> {
        let mut view = self.lock_view()?;
        if view.epoch != epoch || !view.timer.is_running() {
            return Ok(false);
        }

        view.timer.tick();
        debug!("Tick: {}s", view.timer.elapsed_seconds);
        let snapshot = view.snapshot();
        self.publish(snapshot);
        Ok(true)
    }

    /// Click on a feature tile
    pub fn select(&self, id: FeatureId) -> Result<ViewSnapshot, String> {
        self.update_view("select", |view| {
            match view.selection.select(id) {
                Some(selected) => info!("Feature {} selected", selected),
                None => info!("Feature {} deselected", id),
            }
        })
    }

    /// Get the current view snapshot
    pub fn snapshot(&self) -> Result<ViewSnapshot, String> {
        self.lock_view().map(|view| view.snapshot())
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> Result<TimerState, String> {
        self.lock_view().map(|view| view.timer)
    }

    /// Whether a tick schedule is currently live
    pub fn is_ticking(&self) -> bool {
        self.view.lock()
            .map(|view| view.ticker.as_ref().is_some_and(|t| !t.is_finished()))
            .unwrap_or(false)
    }

    /// Watch for view updates
    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot> {
        self.view_update_tx.subscribe()
    }

    /// Stop the stopwatch and cancel any pending tick. Runs even if the view
    /// lock was poisoned, so no schedule outlives the view.
    pub fn teardown(&self) {
        let mut view = self.view.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        view.timer.pause();
        view.epoch += 1;
        view.cancel_ticker();
        let snapshot = view.snapshot();
        self.publish(snapshot);
        drop(view);

        info!("View torn down");
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed())
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        self.teardown();
    }
}
