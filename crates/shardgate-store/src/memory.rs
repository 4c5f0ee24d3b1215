//! In-memory backend for tests and development mode

use crate::backend::{
    body_from_bytes, collect_body, BackendFactory, ObjectBody, ObjectReader, ObjectStat,
    StorageBackend,
};
use crate::error::{Result, StoreError};
use crate::instance::StorageInstance;
use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use std::sync::Arc;

#[derive(Clone)]
struct StoredObject {
    data: Bytes,
    content_type: String,
}

/// One simulated storage node holding buckets and objects in memory
#[derive(Clone, Default)]
pub struct MemoryBackend {
    buckets: Arc<DashMap<String, DashMap<String, StoredObject>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of buckets on this node
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn make_bucket(&self, bucket: &str) -> Result<()> {
        if self.buckets.contains_key(bucket) {
            return Err(StoreError::BucketAlreadyOwned(bucket.to_string()));
        }
        self.buckets.insert(bucket.to_string(), DashMap::new());
        Ok(())
    }

    async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        Ok(self.buckets.contains_key(bucket))
    }

    async fn remove_bucket(&self, bucket: &str) -> Result<()> {
        let entry = self
            .buckets
            .get(bucket)
            .ok_or_else(|| StoreError::BucketNotFound(bucket.to_string()))?;
        if !entry.is_empty() {
            return Err(StoreError::BucketNotEmpty(bucket.to_string()));
        }
        drop(entry);
        self.buckets.remove(bucket);
        Ok(())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: ObjectBody,
        _size: Option<i64>,
    ) -> Result<()> {
        let data = collect_body(body).await?;
        let objects = self
            .buckets
            .get(bucket)
            .ok_or_else(|| StoreError::BucketNotFound(bucket.to_string()))?;
        objects.insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: "application/octet-stream".to_string(),
            },
        );
        Ok(())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<ObjectReader> {
        let objects = self
            .buckets
            .get(bucket)
            .ok_or_else(|| StoreError::BucketNotFound(bucket.to_string()))?;
        let object = objects
            .get(key)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::ObjectNotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })?;

        Ok(ObjectReader {
            stat: ObjectStat {
                content_type: object.content_type,
                size: object.data.len() as i64,
            },
            body: body_from_bytes(object.data),
        })
    }

    async fn remove_object(&self, bucket: &str, key: &str) -> Result<()> {
        let objects = self
            .buckets
            .get(bucket)
            .ok_or_else(|| StoreError::BucketNotFound(bucket.to_string()))?;
        objects
            .remove(key)
            .ok_or_else(|| StoreError::ObjectNotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })?;
        Ok(())
    }
}

/// Factory keeping one [`MemoryBackend`] per instance endpoint, so
/// each registered instance behaves as an independent node
#[derive(Clone, Default)]
pub struct MemoryBackendFactory {
    nodes: Arc<DashMap<String, MemoryBackend>>,
}

impl MemoryBackendFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct handle to the node backing an endpoint
    pub fn node(&self, endpoint: &str) -> MemoryBackend {
        self.nodes.entry(endpoint.to_string()).or_default().clone()
    }
}

impl BackendFactory for MemoryBackendFactory {
    fn build(&self, instance: &StorageInstance) -> Result<Box<dyn StorageBackend>> {
        Ok(Box::new(self.node(&instance.endpoint)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes_body(data: &'static [u8]) -> ObjectBody {
        body_from_bytes(Bytes::from_static(data))
    }

    #[tokio::test]
    async fn bucket_lifecycle() {
        let node = MemoryBackend::new();
        assert!(!node.bucket_exists("b1").await.unwrap());

        node.make_bucket("b1").await.unwrap();
        assert!(node.bucket_exists("b1").await.unwrap());

        assert!(matches!(
            node.make_bucket("b1").await,
            Err(StoreError::BucketAlreadyOwned(_))
        ));

        node.remove_bucket("b1").await.unwrap();
        assert!(!node.bucket_exists("b1").await.unwrap());
        assert!(matches!(
            node.remove_bucket("b1").await,
            Err(StoreError::BucketNotFound(_))
        ));
    }

    #[tokio::test]
    async fn object_roundtrip() {
        let node = MemoryBackend::new();
        node.make_bucket("b1").await.unwrap();
        node.put_object("b1", "obj123", bytes_body(b"hello"), Some(5))
            .await
            .unwrap();

        let reader = node.get_object("b1", "obj123").await.unwrap();
        assert_eq!(reader.stat.size, 5);
        assert_eq!(reader.stat.content_type, "application/octet-stream");
        let data = collect_body(reader.body).await.unwrap();
        assert_eq!(&data[..], b"hello");
    }

    #[tokio::test]
    async fn missing_object_and_bucket_errors() {
        let node = MemoryBackend::new();
        assert!(matches!(
            node.get_object("nope", "obj").await,
            Err(StoreError::BucketNotFound(_))
        ));

        node.make_bucket("b1").await.unwrap();
        assert!(matches!(
            node.get_object("b1", "nope999").await,
            Err(StoreError::ObjectNotFound { .. })
        ));
        assert!(matches!(
            node.put_object("nope", "obj", bytes_body(b"x"), None).await,
            Err(StoreError::BucketNotFound(_))
        ));
    }

    #[tokio::test]
    async fn non_empty_bucket_cannot_be_removed() {
        let node = MemoryBackend::new();
        node.make_bucket("b1").await.unwrap();
        node.put_object("b1", "obj123", bytes_body(b"data"), None)
            .await
            .unwrap();

        assert!(matches!(
            node.remove_bucket("b1").await,
            Err(StoreError::BucketNotEmpty(_))
        ));

        node.remove_object("b1", "obj123").await.unwrap();
        node.remove_bucket("b1").await.unwrap();
    }

    #[tokio::test]
    async fn factory_isolates_nodes_by_endpoint() {
        let factory = MemoryBackendFactory::new();
        let node_a = factory
            .build(&StorageInstance::new("a:9000", "k", "s"))
            .unwrap();
        let node_b = factory
            .build(&StorageInstance::new("b:9000", "k", "s"))
            .unwrap();

        node_a.make_bucket("b1").await.unwrap();
        assert!(node_a.bucket_exists("b1").await.unwrap());
        assert!(!node_b.bucket_exists("b1").await.unwrap());

        // Same endpoint resolves to the same node across builds.
        let node_a2 = factory
            .build(&StorageInstance::new("a:9000", "k", "s"))
            .unwrap();
        assert!(node_a2.bucket_exists("b1").await.unwrap());
    }
}
