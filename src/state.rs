// src/state.rs
use std::sync::Arc;

use crate::services::handler_stats::HandlerStats;
use crate::services::message_board::MessageBoard;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    /// Results area rendered into the demo page.
    pub board: MessageBoard,
    pub stats: HandlerStats,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            board: MessageBoard::new(),
            stats: HandlerStats::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
