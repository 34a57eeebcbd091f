//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::{debug, info};

use super::{FormPatch, StoreEvent, TickOutcome, Timer, TimerForm, TimerStore};
use crate::{
    utils::{Clock, SystemClock},
    view::{format_time_remaining, BoardView},
};

/// Shared state behind every handler and the ticker
///
/// All store and form mutations go through here; locks are only held for
/// the synchronous update and never across an await point.
#[derive(Debug)]
pub struct AppState {
    /// Timers in display order
    store: Mutex<TimerStore>,
    /// Uncommitted input fields
    form: Mutex<TimerForm>,
    clock: Arc<dyn Clock>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Store and form change notifications
    pub store_change_tx: broadcast::Sender<StoreEvent>,
}

impl AppState {
    /// Create a new AppState reading the system clock
    pub fn new(port: u16, host: String) -> Self {
        Self::with_clock(port, host, Arc::new(SystemClock))
    }

    /// Create a new AppState on top of a specific clock
    pub fn with_clock(port: u16, host: String, clock: Arc<dyn Clock>) -> Self {
        let (store_change_tx, _) = broadcast::channel(100);

        Self {
            store: Mutex::new(TimerStore::new()),
            form: Mutex::new(TimerForm::default()),
            clock,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            store_change_tx,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Subscribe to store and form change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.store_change_tx.subscribe()
    }

    fn notify(&self, event: StoreEvent) {
        // Sending only fails when nobody is listening
        if self.store_change_tx.send(event.clone()).is_err() {
            debug!("No listeners for {:?}", event);
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

    /// Add a timer from raw field values
    ///
    /// Incomplete or invalid input is ignored and yields `Ok(None)`. On
    /// success the draft form is cleared.
    pub fn add_timer(&self, title: &str, category: &str, target: &str) -> Result<Option<Timer>, String> {
        let added = self.insert_timer(title, category, target)?;
        if added.is_some() {
            self.form.lock()
                .map_err(|e| format!("Failed to lock form: {}", e))?
                .clear();
        }
        Ok(added)
    }

    /// Add a timer from the current draft form
    ///
    /// The draft is cleared only if nobody edited it while the timer was
    /// being added.
    pub fn submit_form(&self) -> Result<Option<Timer>, String> {
        let submitted = self.get_form()?;
        let added = self.insert_timer(&submitted.title, &submitted.category, &submitted.target)?;
        if added.is_some() && !self.clear_form_if_unchanged(&submitted)? {
            debug!("Draft form edited during submit, keeping the edit");
        }
        Ok(added)
    }

    fn insert_timer(&self, title: &str, category: &str, target: &str) -> Result<Option<Timer>, String> {
        let now = self.now();
        let mut store = self.store.lock()
            .map_err(|e| format!("Failed to lock timer store: {}", e))?;

        let Some(timer) = store.add_timer(title, category, target, now) else {
            return Ok(None);
        };
        drop(store);

        info!(
            "Added timer {} '{}' ({}) with {} remaining",
            timer.id,
            timer.title,
            timer.category,
            format_time_remaining(timer.time_remaining).compact()
        );
        self.record_action("add");
        self.notify(StoreEvent::TimerAdded { id: timer.id });

        Ok(Some(timer))
    }

    /// Clear the draft if it still equals `submitted`; returns whether it did
    fn clear_form_if_unchanged(&self, submitted: &TimerForm) -> Result<bool, String> {
        let mut form = self.form.lock()
            .map_err(|e| format!("Failed to lock form: {}", e))?;

        if *form != *submitted {
            return Ok(false);
        }
        form.clear();
        Ok(true)
    }

    /// Remove a timer regardless of its remaining time
    pub fn remove_timer(&self, id: u64) -> Result<Option<Timer>, String> {
        let mut store = self.store.lock()
            .map_err(|e| format!("Failed to lock timer store: {}", e))?;

        let removed = store.remove_timer(id);
        drop(store);

        if let Some(timer) = &removed {
            info!("Removed timer {} '{}'", timer.id, timer.title);
            self.record_action("remove");
            self.notify(StoreEvent::TimerRemoved { id });
        }

        Ok(removed)
    }

    /// Recompute every timer against the clock
    pub fn tick(&self) -> Result<TickOutcome, String> {
        let now = self.now();
        let mut store = self.store.lock()
            .map_err(|e| format!("Failed to lock timer store: {}", e))?;

        let outcome = store.recompute(now);
        drop(store);

        for id in &outcome.finished {
            info!("Timer {} finished", id);
            self.notify(StoreEvent::TimerFinished { id: *id });
        }
        self.notify(StoreEvent::Ticked { active: outcome.active });

        Ok(outcome)
    }

    /// Update the draft form fields present in `patch`
    pub fn update_form(&self, patch: FormPatch) -> Result<TimerForm, String> {
        let mut form = self.form.lock()
            .map_err(|e| format!("Failed to lock form: {}", e))?;

        form.apply(patch);
        let updated = form.clone();
        drop(form);

        debug!("Draft form updated: {:?}", updated);
        self.notify(StoreEvent::FormChanged);
        Ok(updated)
    }

    pub fn get_form(&self) -> Result<TimerForm, String> {
        self.form.lock()
            .map(|form| form.clone())
            .map_err(|e| format!("Failed to lock form: {}", e))
    }

    /// Snapshot of all timers in display order
    pub fn get_timers(&self) -> Result<Vec<Timer>, String> {
        self.store.lock()
            .map(|store| store.timers().to_vec())
            .map_err(|e| format!("Failed to lock timer store: {}", e))
    }

    pub fn get_timer(&self, id: u64) -> Result<Option<Timer>, String> {
        self.store.lock()
            .map(|store| store.get(id).cloned())
            .map_err(|e| format!("Failed to lock timer store: {}", e))
    }

    /// Number of timers still counting down
    pub fn active_count(&self) -> Result<usize, String> {
        self.store.lock()
            .map(|store| store.active_count())
            .map_err(|e| format!("Failed to lock timer store: {}", e))
    }

    /// Render the full board (form plus cards)
    pub fn board(&self) -> Result<BoardView, String> {
        let timers = self.get_timers()?;
        let form = self.get_form()?;
        Ok(BoardView::build(&form, &timers))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        format_time_remaining(self.start_time.elapsed().as_secs()).human()
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
