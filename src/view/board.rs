//! Board view model: the creation form and one card per timer

use serde::{Deserialize, Serialize};

use super::breakdown::{format_time_remaining, TimeBreakdown};
use crate::state::{Category, Timer, TimerForm};

/// A selectable category in the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    pub value: Category,
    pub label: String,
    pub color: String,
}

/// Creation form as currently filled in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormView {
    pub title: String,
    pub category: String,
    pub target: String,
    pub categories: Vec<CategoryOption>,
    pub add_enabled: bool,
}

/// One numeric cell on a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeCell {
    pub value: u64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerCard {
    pub id: u64,
    pub title: String,
    pub category: String,
    pub color: String,
    pub time_remaining: u64,
    pub breakdown: TimeBreakdown,
    /// Days cell is left out when there are no whole days
    pub cells: Vec<TimeCell>,
    pub is_running: bool,
    /// Remove is only offered once the countdown has reached zero
    pub remove_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub form: FormView,
    pub cards: Vec<TimerCard>,
}

impl FormView {
    pub fn build(form: &TimerForm) -> Self {
        Self {
            title: form.title.clone(),
            category: form.category.clone(),
            target: form.target.clone(),
            categories: Category::ALL
                .iter()
                .map(|category| CategoryOption {
                    value: *category,
                    label: category.label().to_string(),
                    color: category.color().to_string(),
                })
                .collect(),
            add_enabled: form.is_complete(),
        }
    }
}

impl TimerCard {
    pub fn build(timer: &Timer) -> Self {
        let breakdown = format_time_remaining(timer.time_remaining);

        let mut cells = Vec::with_capacity(4);
        if breakdown.days > 0 {
            cells.push(TimeCell::new(breakdown.days, "days"));
        }
        cells.push(TimeCell::new(breakdown.hours, "hours"));
        cells.push(TimeCell::new(breakdown.minutes, "minutes"));
        cells.push(TimeCell::new(breakdown.seconds, "seconds"));

        Self {
            id: timer.id,
            title: timer.title.clone(),
            category: timer.category.label().to_string(),
            color: timer.category.color().to_string(),
            time_remaining: timer.time_remaining,
            breakdown,
            cells,
            is_running: timer.is_running,
            remove_enabled: timer.is_finished(),
        }
    }
}

impl TimeCell {
    fn new(value: u64, unit: &str) -> Self {
        Self {
            value,
            unit: unit.to_string(),
        }
    }
}

impl BoardView {
    /// Derive the whole board from the draft form and the stored timers
    pub fn build(form: &TimerForm, timers: &[Timer]) -> Self {
        Self {
            form: FormView::build(form),
            cards: timers.iter().map(TimerCard::build).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn timer(id: u64, category: Category, remaining: i64) -> Timer {
        let now = Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap();
        Timer::new(id, format!("Timer {}", id), category, now + Duration::seconds(remaining), now)
    }

    fn units(card: &TimerCard) -> Vec<&str> {
        card.cells.iter().map(|cell| cell.unit.as_str()).collect()
    }

    #[test]
    fn test_days_cell_hidden_when_zero() {
        let card = TimerCard::build(&timer(1, Category::Meeting, 3_661));
        assert_eq!(units(&card), vec!["hours", "minutes", "seconds"]);
        assert_eq!(card.cells[0].value, 1);
    }

    #[test]
    fn test_days_cell_shown_when_present() {
        let card = TimerCard::build(&timer(1, Category::Birthday, 90_061));
        assert_eq!(units(&card), vec!["days", "hours", "minutes", "seconds"]);
        assert!(card.cells.iter().all(|cell| cell.value == 1));
        assert_eq!(card.color, "#ef4444");
        assert_eq!(card.category, "Birthday");
    }

    #[test]
    fn test_remove_gate_follows_remaining_time() {
        let running = TimerCard::build(&timer(1, Category::Reminder, 1));
        assert!(!running.remove_enabled);
        assert!(running.is_running);

        let done = TimerCard::build(&timer(2, Category::Reminder, -5));
        assert!(done.remove_enabled);
        assert!(!done.is_running);
    }

    #[test]
    fn test_board_keeps_store_order_and_form_state() {
        let timers = vec![
            timer(3, Category::Reminder, 10),
            timer(1, Category::Meeting, 20),
        ];
        let form = TimerForm::new("Lunch", "", "");
        let board = BoardView::build(&form, &timers);

        assert_eq!(board.cards.iter().map(|c| c.id).collect::<Vec<_>>(), vec![3, 1]);
        assert!(!board.form.add_enabled);
        assert_eq!(board.form.title, "Lunch");
        assert_eq!(board.form.categories.len(), 3);
    }
}
