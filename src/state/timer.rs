//! Countdown timer record and its categories

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed set of timer categories, each bound to a display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Meeting,
    Birthday,
    Reminder,
}

impl Category {
    /// Every selectable category, in form order
    pub const ALL: [Category; 3] = [Category::Meeting, Category::Birthday, Category::Reminder];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Meeting => "Meeting",
            Category::Birthday => "Birthday",
            Category::Reminder => "Reminder",
        }
    }

    /// Card background color as a CSS hex string
    pub fn color(&self) -> &'static str {
        match self {
            Category::Meeting => "#3b82f6",
            Category::Birthday => "#ef4444",
            Category::Reminder => "#22c55e",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown category: {}", wanted))
    }
}

/// Whole seconds left until `target`, clamped at zero
pub fn calculate_time_remaining(target: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let millis = (target - now).num_milliseconds();
    if millis <= 0 {
        0
    } else {
        (millis / 1000) as u64
    }
}

/// A single countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub id: u64,
    pub title: String,
    pub category: Category,
    pub target_date_time: DateTime<Utc>,
    /// Seconds left as of the last recompute
    pub time_remaining: u64,
    /// Cleared once the countdown hits zero; never set again
    pub is_running: bool,
    /// Reserved for in-place title editing; nothing reads or changes it
    pub show_title_input: bool,
}

impl Timer {
    /// Create a timer, computing its remaining time against `now`
    pub fn new(
        id: u64,
        title: String,
        category: Category,
        target_date_time: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        let time_remaining = calculate_time_remaining(target_date_time, now);
        Self {
            id,
            title,
            category,
            target_date_time,
            time_remaining,
            is_running: time_remaining > 0,
            show_title_input: false,
        }
    }

    /// Whether the ticker still has work to do for this timer
    pub fn is_active(&self) -> bool {
        self.is_running && self.time_remaining > 0
    }

    pub fn is_finished(&self) -> bool {
        self.time_remaining == 0
    }

    /// Copy of this timer with remaining time recomputed against `now`
    ///
    /// Remaining time never grows, even if the wall clock steps backwards.
    pub fn recomputed(&self, now: DateTime<Utc>) -> Self {
        if !self.is_running {
            return self.clone();
        }
        let time_remaining =
            calculate_time_remaining(self.target_date_time, now).min(self.time_remaining);
        Self {
            time_remaining,
            is_running: time_remaining > 0,
            ..self.clone()
        }
    }
}
