//! Countdown Board - named, categorized countdown timers served over HTTP
//!
//! This library holds the in-memory timer store, the single ticker that keeps
//! every countdown in step with the wall clock, and the board view that
//! clients render.

pub mod config;
pub mod state;
pub mod view;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use tasks::TickerHandle;
pub use utils::signals::shutdown_signal;
