//! Gateway configuration

use serde::{Deserialize, Serialize};

/// Gateway server configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Storage node list, `ENDPOINT|ACCESS_KEY|SECRET_KEY` entries
    /// separated by commas
    pub nodes: String,
    /// Use in-memory backends (for testing/development)
    pub use_memory_store: bool,
    /// Admission gate refill rate (requests per second)
    pub rate_limit_rps: u32,
    /// Admission gate burst size
    pub rate_limit_burst: u32,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            nodes: String::new(),
            use_memory_store: false,
            rate_limit_rps: 100,
            rate_limit_burst: 50,
        }
    }
}

impl GatewayConfig {
    /// Get the bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
