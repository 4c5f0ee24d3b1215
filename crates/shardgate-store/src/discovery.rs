//! Backend instance discovery
//!
//! Deployments may enumerate storage nodes however they like, e.g. by
//! inspecting sibling containers. Container plumbing is outside this
//! crate; the [`Discover`] trait is the seam, and [`StaticDiscovery`]
//! is the production implementation reading the fleet from
//! configuration.

use crate::error::{Result, StoreError};
use crate::instance::StorageInstance;
use async_trait::async_trait;

/// Discovery collaborator producing the backend fleet at startup.
///
/// Implementations must fail rather than return an empty set; the
/// process does not start without backends.
#[async_trait]
pub trait Discover: Send + Sync {
    async fn discover(&self) -> Result<Vec<StorageInstance>>;
}

/// Discovery from a configured node list.
///
/// Spec format: comma-separated entries of
/// `ENDPOINT|ACCESS_KEY|SECRET_KEY`, e.g.
/// `10.0.0.1:9000|minio|minio123,10.0.0.2:9000|minio|minio123`.
pub struct StaticDiscovery {
    spec: String,
}

impl StaticDiscovery {
    pub fn new(spec: impl Into<String>) -> Self {
        Self { spec: spec.into() }
    }
}

#[async_trait]
impl Discover for StaticDiscovery {
    async fn discover(&self) -> Result<Vec<StorageInstance>> {
        let instances = parse_nodes(&self.spec)?;
        tracing::debug!(count = instances.len(), "parsed storage nodes from config");
        Ok(instances)
    }
}

/// Parse a node list spec into instances, preserving entry order.
pub fn parse_nodes(spec: &str) -> Result<Vec<StorageInstance>> {
    let mut instances = Vec::new();
    for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let mut fields = entry.split('|').map(str::trim);
        match (fields.next(), fields.next(), fields.next(), fields.next()) {
            (Some(endpoint), Some(access_key), Some(secret_key), None)
                if !endpoint.is_empty() && !access_key.is_empty() && !secret_key.is_empty() =>
            {
                instances.push(StorageInstance::new(endpoint, access_key, secret_key));
            }
            _ => return Err(StoreError::InvalidNodeSpec(entry.to_string())),
        }
    }
    if instances.is_empty() {
        return Err(StoreError::NoInstances);
    }
    Ok(instances)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn discovers_configured_nodes_in_order() {
        let discovery = StaticDiscovery::new(
            "10.0.0.1:9000|minio|minio123, 10.0.0.2:9000|other|secret2",
        );
        let instances = discovery.discover().await.unwrap();
        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].endpoint, "10.0.0.1:9000");
        assert_eq!(instances[1].access_key, "other");
        assert_eq!(instances[1].secret_key, "secret2");
    }

    #[tokio::test]
    async fn empty_spec_fails_discovery() {
        let discovery = StaticDiscovery::new("");
        assert!(matches!(
            discovery.discover().await,
            Err(StoreError::NoInstances)
        ));
    }

    #[test]
    fn rejects_entry_with_missing_fields() {
        let err = parse_nodes("10.0.0.1:9000|minio").unwrap_err();
        assert!(matches!(err, StoreError::InvalidNodeSpec(_)));
    }

    #[test]
    fn rejects_entry_with_extra_fields() {
        assert!(parse_nodes("a:9000|k|s|extra").is_err());
    }

    #[test]
    fn rejects_blank_credentials() {
        assert!(parse_nodes("10.0.0.1:9000||secret").is_err());
    }

    #[test]
    fn tolerates_trailing_comma() {
        let instances = parse_nodes("10.0.0.1:9000|minio|minio123,").unwrap();
        assert_eq!(instances.len(), 1);
    }
}
