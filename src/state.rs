use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;
use crate::upstream::{HttpBackend, SharedBackend};
use axum::extract::FromRef;

/// Application context passed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub backend: SharedBackend,
    pub config: Config,
}

impl AppState {
    /// Builds the context for the configured upstream backend.
    pub fn initialize(config: Config) -> Result<Self, AppError> {
        let backend = HttpBackend::new(config.upstream_url.clone(), config.upstream_timeout)?;
        tracing::info!("Upstream backend: {}", config.upstream_url);

        Ok(Self {
            backend: Arc::new(backend),
            config,
        })
    }
}

impl FromRef<AppState> for SharedBackend {
    fn from_ref(state: &AppState) -> Self {
        state.backend.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
