use dashmap::DashMap;

use crate::storage::{ObjectLocation, Storage, StorageError, StoredObject};

/// In-process store used by tests in place of a real bucket.
pub struct MemoryObjectStore {
    objects: DashMap<ObjectLocation, StoredObject>
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self {
            objects: DashMap::new()
        }
    }

    pub fn insert(&self, location: ObjectLocation, body: impl Into<Vec<u8>>) {
        self.objects.insert(location, StoredObject {
            body: body.into(),
            content_type: "text/csv".to_string(),
            metadata: Default::default()
        });
    }

    pub fn object(&self, location: &ObjectLocation) -> Option<StoredObject> {
        self.objects.get(location).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }
}

impl Storage for MemoryObjectStore {
    fn get(&self, location: &ObjectLocation) -> Result<Vec<u8>, StorageError> {
        self.objects.get(location)
            .map(|entry| entry.value().body.clone())
            .ok_or_else(|| StorageError::NotFound {
                bucket: location.bucket.clone(),
                key: location.key.clone()
            })
    }

    fn put(&self, location: &ObjectLocation, object: StoredObject) -> Result<(), StorageError> {
        self.objects.insert(location.clone(), object);
        Ok(())
    }
}
