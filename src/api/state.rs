use std::sync::Arc;

use crate::config::Config;
use crate::observability::Metrics;
use crate::resolve::Orchestrator;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub orchestrator: Arc<Orchestrator>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(config: Config, orchestrator: Orchestrator, metrics: Arc<Metrics>) -> Self {
        Self {
            config: Arc::new(config),
            orchestrator: Arc::new(orchestrator),
            metrics,
        }
    }
}
