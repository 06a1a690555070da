// Application state module
// Shared, read-only state handed to every connection

use std::sync::Arc;

use super::types::Config;
use crate::redirect::Handler;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Head of the dispatcher chain; immutable once the server starts
    pub handler: Arc<dyn Handler>,
}

impl AppState {
    pub fn new(config: Config, handler: Arc<dyn Handler>) -> Self {
        Self { config, handler }
    }

    pub fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }
}
