//! Ordered, in-memory timer store

use chrono::{DateTime, Utc};
use tracing::debug;

use super::{form::parse_target, Category, Timer};

/// Result of recomputing every timer against the clock
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Timers that reached zero on this recompute
    pub finished: Vec<u64>,
    /// Timers still counting down afterwards
    pub active: usize,
}

/// Timers in insertion order plus the id counter
///
/// Every mutation swaps in a freshly built sequence rather than editing
/// records in place.
#[derive(Debug, Clone)]
pub struct TimerStore {
    timers: Vec<Timer>,
    next_id: u64,
}

impl TimerStore {
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            next_id: 1,
        }
    }

    pub fn timers(&self) -> &[Timer] {
        &self.timers
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Timer> {
        self.timers.iter().find(|timer| timer.id == id)
    }

    /// Number of timers the ticker still has to drive
    pub fn active_count(&self) -> usize {
        self.timers.iter().filter(|timer| timer.is_active()).count()
    }

    /// Append a new timer built from raw form input
    ///
    /// Returns `None` and leaves the store untouched when any field is
    /// empty or the category is not one of [`Category::ALL`]. A target that
    /// does not parse counts as already reached.
    pub fn add_timer(
        &mut self,
        title: &str,
        category: &str,
        target: &str,
        now: DateTime<Utc>,
    ) -> Option<Timer> {
        if title.trim().is_empty() || category.trim().is_empty() || target.trim().is_empty() {
            debug!("Ignoring add with incomplete fields");
            return None;
        }

        let category: Category = match category.parse() {
            Ok(category) => category,
            Err(e) => {
                debug!("Ignoring add: {}", e);
                return None;
            }
        };

        let target_date_time = parse_target(target).unwrap_or_else(|| {
            debug!("Unparseable target '{}', treating as reached", target);
            now
        });

        let timer = Timer::new(self.next_id, title.to_string(), category, target_date_time, now);
        self.next_id += 1;

        let mut timers = Vec::with_capacity(self.timers.len() + 1);
        timers.extend(self.timers.iter().cloned());
        timers.push(timer.clone());
        self.timers = timers;

        Some(timer)
    }

    /// Remove the timer with `id`, if present
    ///
    /// Does not check whether the countdown has finished.
    pub fn remove_timer(&mut self, id: u64) -> Option<Timer> {
        let removed = self.get(id).cloned()?;
        self.timers = self
            .timers
            .iter()
            .filter(|timer| timer.id != id)
            .cloned()
            .collect();
        Some(removed)
    }

    /// Recompute every timer's remaining time against `now`
    pub fn recompute(&mut self, now: DateTime<Utc>) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        self.timers = self
            .timers
            .iter()
            .map(|timer| {
                let next = timer.recomputed(now);
                if timer.is_running && !next.is_running {
                    outcome.finished.push(next.id);
                }
                if next.is_active() {
                    outcome.active += 1;
                }
                next
            })
            .collect();

        outcome
    }
}

impl Default for TimerStore {
    fn default() -> Self {
        Self::new()
    }
}
