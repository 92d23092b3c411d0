//! HTTP API for Pixel Perfect

mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::history::HistoryStore;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub history: Arc<dyn HistoryStore>,
}

impl AppState {
    pub fn new(history: Arc<dyn HistoryStore>) -> Self {
        Self { history }
    }
}
