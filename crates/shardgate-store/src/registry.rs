//! Instance registry

use crate::error::{Result, StoreError};
use crate::instance::StorageInstance;
use crate::shard;

/// The ordered, fixed-size view of the backend fleet.
///
/// Built once at startup from the discovery collaborator and read-only
/// for the lifetime of the process. Safe for unsynchronized concurrent
/// reads.
#[derive(Debug, Clone)]
pub struct InstanceRegistry {
    instances: Vec<StorageInstance>,
}

impl InstanceRegistry {
    /// Create a registry from a discovered instance set.
    ///
    /// Fails with [`StoreError::NoInstances`] when the set is empty;
    /// there is no degraded mode with zero backends.
    pub fn new(instances: Vec<StorageInstance>) -> Result<Self> {
        if instances.is_empty() {
            return Err(StoreError::NoInstances);
        }
        Ok(Self { instances })
    }

    /// Number of registered instances
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// The registry is never empty by construction
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Deterministic instance index for a routing key
    pub fn select_index(&self, key: &str) -> usize {
        shard::shard_index(key, self.instances.len())
    }

    /// Instance selected for a routing key, with its index
    pub fn select(&self, key: &str) -> (usize, &StorageInstance) {
        let index = self.select_index(key);
        (index, &self.instances[index])
    }

    /// All registered instances, in discovery order
    pub fn instances(&self) -> &[StorageInstance] {
        &self.instances
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fleet(n: usize) -> Vec<StorageInstance> {
        (0..n)
            .map(|i| StorageInstance::new(format!("10.0.0.{}:9000", i), "minio", "minio123"))
            .collect()
    }

    #[test]
    fn rejects_empty_instance_set() {
        assert!(matches!(
            InstanceRegistry::new(Vec::new()),
            Err(StoreError::NoInstances)
        ));
    }

    #[test]
    fn select_is_stable_for_a_key() {
        let registry = InstanceRegistry::new(fleet(5)).unwrap();
        let (index, instance) = registry.select("obj123");
        for _ in 0..10 {
            let (again, same) = registry.select("obj123");
            assert_eq!(again, index);
            assert_eq!(same, instance);
        }
    }

    #[test]
    fn select_index_in_range() {
        let registry = InstanceRegistry::new(fleet(3)).unwrap();
        for i in 0..200 {
            assert!(registry.select_index(&format!("key{}", i)) < 3);
        }
    }

    #[test]
    fn single_instance_registry_selects_it() {
        let registry = InstanceRegistry::new(fleet(1)).unwrap();
        assert_eq!(registry.select_index("anything"), 0);
        assert_eq!(registry.len(), 1);
    }
}
