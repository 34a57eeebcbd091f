//! Utility functions module
//!
//! Signal handling and the wall-clock abstraction used by the countdowns.

pub mod clock;
pub mod signals;

// Re-export main items
pub use clock::{Clock, ManualClock, SystemClock};
pub use signals::shutdown_signal;
