use crate::config::ServerConfig;
use crate::error::ServerResult;
use metrics_exporter_prometheus::PrometheusHandle;
use pantry_match::{Engine, EngineConfig};
use std::sync::Arc;
use std::time::Instant;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Matching engine (owns the taxonomy snapshot)
    pub engine: Arc<Engine>,

    /// Prometheus render handle, present when a recorder is installed
    pub metrics: Option<PrometheusHandle>,

    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl ServerState {
    /// Create new server state, building the engine from
    /// `engine_config_path` or from defaults.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let engine = match &config.engine_config_path {
            Some(path) => Engine::from_config_file(path)?,
            None => Engine::new(EngineConfig::default())?,
        };
        Ok(Self::with_engine(config, Arc::new(engine)))
    }

    /// Wrap an already built engine.
    pub fn with_engine(config: ServerConfig, engine: Arc<Engine>) -> Self {
        Self {
            config: Arc::new(config),
            engine,
            metrics: None,
            started_at: Instant::now(),
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
