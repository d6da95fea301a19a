//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::ResponseCache;
use crate::odpt::TrainInformationSource;

/// Shared application state.
///
/// Both collaborators are injected so tests can substitute in-memory
/// stand-ins.
#[derive(Clone)]
pub struct AppState {
    /// Request-keyed response cache
    pub cache: Arc<dyn ResponseCache>,

    /// Upstream train information
    pub source: Arc<dyn TrainInformationSource>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        cache: impl ResponseCache + 'static,
        source: impl TrainInformationSource + 'static,
    ) -> Self {
        Self {
            cache: Arc::new(cache),
            source: Arc::new(source),
        }
    }
}
