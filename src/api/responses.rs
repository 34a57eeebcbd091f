//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{state::Timer, view::BoardView};

/// Response for actions that change the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Timer the action applied to, if any
    pub timer: Option<Timer>,
    pub board: BoardView,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: &str, message: String, timer: Option<Timer>, board: BoardView) -> Self {
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            timer,
            board,
        }
    }

    pub fn added(timer: Timer, board: BoardView) -> Self {
        let message = format!("Timer '{}' added", timer.title);
        Self::new("added", message, Some(timer), board)
    }

    /// The add was incomplete or invalid and nothing changed
    pub fn ignored(board: BoardView) -> Self {
        Self::new("ignored", "Form incomplete, no timer added".to_string(), None, board)
    }

    pub fn removed(timer: Timer, board: BoardView) -> Self {
        let message = format!("Timer '{}' removed", timer.title);
        Self::new("removed", message, Some(timer), board)
    }
}

/// Service status with timer counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub total_timers: usize,
    pub running_timers: usize,
    pub finished_timers: usize,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
