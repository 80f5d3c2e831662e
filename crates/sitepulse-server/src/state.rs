use std::sync::Arc;

use sitepulse_core::{analytics::AnalyticsStore, config::Config};

/// Shared application state injected into every Axum handler via
/// [`axum::extract::State`].
///
/// The store is held as a trait object so handlers and middleware never name
/// the DuckDB backend directly; tests swap in whatever implements
/// [`AnalyticsStore`].
pub struct AppState {
    pub store: Arc<dyn AnalyticsStore>,
    /// Parsed configuration, loaded once at startup from environment variables.
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn AnalyticsStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
