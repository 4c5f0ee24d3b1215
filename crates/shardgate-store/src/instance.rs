//! Backend instance model

use std::fmt;

/// One independently addressable object-storage node with its own
/// credentials. Immutable once constructed.
#[derive(Clone, PartialEq, Eq)]
pub struct StorageInstance {
    /// Network address of the node, `host:port`
    pub endpoint: String,
    /// Access key for the node
    pub access_key: String,
    /// Secret key for the node
    pub secret_key: String,
}

impl StorageInstance {
    /// Create a new instance descriptor
    pub fn new(
        endpoint: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }
}

// Secret key stays out of log output.
impl fmt::Debug for StorageInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageInstance")
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_secret_key() {
        let instance = StorageInstance::new("10.0.0.1:9000", "minio", "hunter2");
        let rendered = format!("{:?}", instance);
        assert!(rendered.contains("10.0.0.1:9000"));
        assert!(!rendered.contains("hunter2"));
    }
}
