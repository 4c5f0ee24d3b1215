//! # Shardgate Store
//!
//! Backend-selection layer for the Shardgate object-storage gateway.
//!
//! This crate provides:
//! - **Instance registry**: the fixed, ordered fleet of storage backends
//! - **Shard selection**: deterministic FNV-1a assignment of routing keys
//! - **Discovery**: the collaborator that enumerates backend instances
//! - **Storage backends**: bucket/object primitives behind the
//!   [`StorageBackend`] trait, with an `aws-sdk-s3` production adapter
//!   and an in-memory implementation for tests and development
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            Gateway Handlers             │
//! ├─────────────────────────────────────────┤
//! │   InstanceRegistry ──► BackendFactory   │
//! ├─────────────────────┬───────────────────┤
//! │      S3Backend      │   MemoryBackend   │
//! ├─────────────────────┴───────────────────┤
//! │        Storage fleet (MinIO, S3)        │
//! └─────────────────────────────────────────┘
//! ```

pub mod backend;
pub mod discovery;
pub mod error;
pub mod instance;
pub mod memory;
pub mod registry;
pub mod s3;
pub mod shard;

pub use backend::{
    body_from_bytes, collect_body, BackendFactory, ObjectBody, ObjectReader, ObjectStat,
    StorageBackend,
};
pub use discovery::{parse_nodes, Discover, StaticDiscovery};
pub use error::{Result, StoreError};
pub use instance::StorageInstance;
pub use memory::{MemoryBackend, MemoryBackendFactory};
pub use registry::InstanceRegistry;
pub use s3::S3BackendFactory;
pub use shard::shard_index;
