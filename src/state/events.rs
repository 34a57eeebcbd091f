//! Change notifications published by the application state

use serde::Serialize;

/// Something changed in the store or the draft form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    TimerAdded { id: u64 },
    TimerRemoved { id: u64 },
    TimerFinished { id: u64 },
    /// One recompute pass ran; `active` timers are still counting
    Ticked { active: usize },
    FormChanged,
}
