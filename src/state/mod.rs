//! State management module
//!
//! Timer records, the ordered store that holds them, the draft form, and
//! the shared application state that serializes every mutation.

pub mod app_state;
pub mod events;
pub mod form;
pub mod store;
pub mod timer;

// Re-export main types
pub use app_state::AppState;
pub use events::StoreEvent;
pub use form::{FormPatch, TimerForm};
pub use store::{TickOutcome, TimerStore};
pub use timer::{calculate_time_remaining, Category, Timer};
