//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! owns the relay hub explicitly; there is no process-global socket registry.

use crate::config::Config;
use crate::services::relay::RelayHub;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; the hub is Arc-backed.
#[derive(Clone, Default)]
pub struct AppState {
    pub hub: RelayHub,
}

impl AppState {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self { hub: RelayHub::new(config.client_queue) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
