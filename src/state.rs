// Application state — built once at startup, read-only afterwards.

use std::sync::Arc;

use crate::config::Config;
use crate::system_monitor::{MetricsSource, SysinfoCollector};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub metrics: Arc<dyn MetricsSource>,
}

impl AppState {
    /// State backed by the live sysinfo collector.
    pub fn new(config: Config) -> Self {
        Self::with_source(config, SysinfoCollector::default())
    }

    pub fn with_source(config: Config, source: impl MetricsSource) -> Self {
        Self {
            config: Arc::new(config),
            metrics: Arc::new(source),
        }
    }
}
