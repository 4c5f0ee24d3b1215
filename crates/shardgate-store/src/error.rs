//! Error types for the shardgate-store crate

use thiserror::Error;

/// Result type alias using `StoreError`
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in discovery, shard selection, or backend calls
#[derive(Error, Debug)]
pub enum StoreError {
    /// Discovery produced an empty instance set
    #[error("no storage instances discovered")]
    NoInstances,

    /// A node spec entry could not be parsed
    #[error("invalid storage node spec: {0}")]
    InvalidNodeSpec(String),

    /// Instance credentials are structurally invalid
    #[error("invalid credentials for instance {0}")]
    InvalidCredentials(String),

    /// Bucket does not exist on the selected backend
    #[error("bucket not found: {0}")]
    BucketNotFound(String),

    /// Object does not exist in the bucket
    #[error("object not found: {bucket}/{key}")]
    ObjectNotFound { bucket: String, key: String },

    /// Bucket already exists and is owned by this caller
    #[error("bucket already owned: {0}")]
    BucketAlreadyOwned(String),

    /// Bucket name is taken by another owner
    #[error("bucket name already taken: {0}")]
    BucketNameTaken(String),

    /// Bucket still holds objects
    #[error("bucket not empty: {0}")]
    BucketNotEmpty(String),

    /// Payload stream failed mid-transfer
    #[error("stream error: {0}")]
    Stream(String),

    /// Any other backend transport or service failure
    #[error("storage backend error: {0}")]
    Backend(String),
}
