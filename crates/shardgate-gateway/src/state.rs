//! Application state

use crate::config::GatewayConfig;
use crate::error::ApiError;
use shardgate_store::{
    BackendFactory, InstanceRegistry, MemoryBackendFactory, S3BackendFactory, StorageBackend,
};
use tracing::warn;

/// State shared across handlers: the read-only instance registry and
/// the injected backend-client factory.
pub struct AppState {
    /// Gateway configuration
    pub config: GatewayConfig,
    /// Ordered backend fleet, fixed for the process lifetime
    pub registry: InstanceRegistry,
    backends: Box<dyn BackendFactory>,
}

impl AppState {
    /// Create state with the factory implied by the configuration
    pub fn new(config: GatewayConfig, registry: InstanceRegistry) -> Self {
        let backends: Box<dyn BackendFactory> = if config.use_memory_store {
            warn!("using in-memory backends - data will NOT persist");
            Box::new(MemoryBackendFactory::new())
        } else {
            Box::new(S3BackendFactory::new())
        };
        Self::with_factory(config, registry, backends)
    }

    /// Create state with an explicit factory (tests inject a double here)
    pub fn with_factory(
        config: GatewayConfig,
        registry: InstanceRegistry,
        backends: Box<dyn BackendFactory>,
    ) -> Self {
        Self {
            config,
            registry,
            backends,
        }
    }

    /// Build a one-request client for the instance a routing key maps to
    pub fn backend_for(&self, routing_key: &str) -> Result<Box<dyn StorageBackend>, ApiError> {
        let (index, instance) = self.registry.select(routing_key);
        tracing::debug!(
            key = %routing_key,
            instance = index,
            endpoint = %instance.endpoint,
            "selected backend instance"
        );
        Ok(self.backends.build(instance)?)
    }
}
