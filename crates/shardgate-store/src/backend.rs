//! Storage backend trait and client factory seam

use crate::error::{Result, StoreError};
use crate::instance::StorageInstance;
use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;

/// A boxed chunk stream carrying an object payload in either direction
pub type ObjectBody = Pin<Box<dyn Stream<Item = std::result::Result<Bytes, StoreError>> + Send>>;

/// Object metadata reported by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectStat {
    /// MIME type of the stored payload
    pub content_type: String,
    /// Payload size in bytes
    pub size: i64,
}

/// A streaming read handle for one object
pub struct ObjectReader {
    pub stat: ObjectStat,
    pub body: ObjectBody,
}

/// Bucket/object primitives against one backend instance.
///
/// A handle is bound to a single instance's address and credentials,
/// lives for one request, and is discarded afterwards.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Create a bucket
    async fn make_bucket(&self, bucket: &str) -> Result<()>;

    /// Check whether a bucket exists
    async fn bucket_exists(&self, bucket: &str) -> Result<bool>;

    /// Delete an empty bucket
    async fn remove_bucket(&self, bucket: &str) -> Result<()>;

    /// Store an object from a chunk stream; `size` is a hint when the
    /// inbound request declared a content length
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: ObjectBody,
        size: Option<i64>,
    ) -> Result<()>;

    /// Open an object for streaming reads
    async fn get_object(&self, bucket: &str, key: &str) -> Result<ObjectReader>;

    /// Delete an object
    async fn remove_object(&self, bucket: &str, key: &str) -> Result<()>;
}

/// Builds a short-lived [`StorageBackend`] client for an instance.
///
/// Pure construction: no network round trip is required to succeed,
/// and failures only signal structurally invalid credentials. One
/// client is built per request; there is no pooling.
pub trait BackendFactory: Send + Sync {
    fn build(&self, instance: &StorageInstance) -> Result<Box<dyn StorageBackend>>;
}

/// Wrap a single in-memory chunk as an [`ObjectBody`]
pub fn body_from_bytes(data: Bytes) -> ObjectBody {
    let chunk: std::result::Result<Bytes, StoreError> = Ok(data);
    Box::pin(futures::stream::iter(std::iter::once(chunk)))
}

/// Drain an [`ObjectBody`] into contiguous bytes
pub async fn collect_body(mut body: ObjectBody) -> Result<Bytes> {
    use bytes::BytesMut;
    use futures::StreamExt;

    let mut buf = BytesMut::new();
    while let Some(chunk) = body.next().await {
        buf.extend_from_slice(&chunk?);
    }
    Ok(buf.freeze())
}
