mod errors;
mod keys;
mod local_storage;
#[cfg(test)]
mod memory_storage;
#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::fmt;
use std::fmt::{Display, Formatter};

pub use errors::StorageError;
pub use keys::{processed_key, RAW_PREFIX};
pub use local_storage::LocalObjectStore;
#[cfg(test)]
pub use memory_storage::MemoryObjectStore;

/// Address of an object in the external store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String
}

impl ObjectLocation {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into()
        }
    }
}

impl Display for ObjectLocation {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}/{}", self.bucket, self.key)
    }
}

/// An object body with its content type and user metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: String,
    pub metadata: BTreeMap<String, String>
}

/// The object store the pipeline reads input from and writes output to.
///
/// `put` must be all-or-nothing: a reader never observes a partially written object.
pub trait Storage: Send + Sync + 'static {
    fn get(&self, location: &ObjectLocation) -> Result<Vec<u8>, StorageError>;
    fn put(&self, location: &ObjectLocation, object: StoredObject) -> Result<(), StorageError>;
}
