//! Application State
//!
//! Shared state accessible by all handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::app::error::AppError;
use crate::config::Config;
use crate::dashboard::ViewComposer;
use crate::live::{RegistryConfig, SessionRegistry};

/// Shared application state for all handlers
pub struct AppState {
    /// Full application configuration
    pub config: Arc<Config>,
    /// Chart composer, fixed at boot from the dashboard configuration
    pub composer: ViewComposer,
    /// Live session registry
    pub registry: Arc<SessionRegistry>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create application state from configuration.
    ///
    /// Fails if the configured palette does not exist.
    pub fn new(config: Config) -> Result<Self, AppError> {
        let composer = ViewComposer::from_config(&config.dashboard)?;
        let registry = SessionRegistry::new(RegistryConfig {
            max_sessions: config.server.max_sessions,
        });

        Ok(Self {
            config: Arc::new(config),
            composer,
            registry: Arc::new(registry),
            start_time: Instant::now(),
        })
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Get live session count
    pub async fn session_count(&self) -> usize {
        self.registry.session_count().await
    }
}
