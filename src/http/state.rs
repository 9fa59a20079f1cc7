//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::FullRepository;
use crate::services::Clock;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for store operations
    pub repository: Arc<dyn FullRepository>,
    /// Wall-clock source for timestamping mutations
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(repository: Arc<dyn FullRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}
