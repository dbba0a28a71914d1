//! Shared application state.

use std::sync::Arc;

use logbook_core::clock::Clock;
use logbook_core::repository::{LogRepository, SourceRepository};

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Source of server-assigned timestamps.
    pub clock: Arc<dyn Clock>,
    /// Event source repository.
    pub sources: Arc<dyn SourceRepository>,
    /// Event log repository.
    pub logs: Arc<dyn LogRepository>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        sources: Arc<dyn SourceRepository>,
        logs: Arc<dyn LogRepository>,
    ) -> Self {
        Self {
            clock,
            sources,
            logs,
        }
    }
}
