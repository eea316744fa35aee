//! Shared application state for request handlers.

use std::sync::Arc;
use tera::Tera;

use crate::config::AppConfig;
use crate::probe::ProbeSpec;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Contains the application configuration, Tera template engine, and the
/// ordered probe set executed on each status request. The probe set is built
/// once at startup and shared read-only - there are no per-request
/// singletons and no shared connections.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tera: Arc<Tera>,
    pub probes: Arc<Vec<ProbeSpec>>,
}

impl AppState {
    /// Creates a new application state from the given configuration,
    /// templates, and probe set.
    pub fn new(config: AppConfig, tera: Tera, probes: Vec<ProbeSpec>) -> Self {
        Self {
            config: Arc::new(config),
            tera: Arc::new(tera),
            probes: Arc::new(probes),
        }
    }
}
