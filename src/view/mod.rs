//! Presentation module
//!
//! Pure derivation of what a client displays from the store and draft form.

pub mod board;
pub mod breakdown;

pub use board::{BoardView, CategoryOption, FormView, TimeCell, TimerCard};
pub use breakdown::{format_time_remaining, TimeBreakdown};
