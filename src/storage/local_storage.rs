use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::storage::{ObjectLocation, Storage, StorageError, StoredObject};

/// Filesystem-backed store: each bucket is a directory under `root` and
/// each key a relative path inside it.
pub struct LocalObjectStore {
    root: PathBuf
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into()
        }
    }

    fn resolve(&self, location: &ObjectLocation) -> Result<PathBuf, StorageError> {
        let mut path = self.root.clone();

        for part in [&location.bucket, &location.key] {
            let relative = Path::new(part);
            let is_plain = !part.is_empty() && relative.components().all(|component| matches!(component, Component::Normal(_)));

            if !is_plain {
                return Err(StorageError::InvalidKey(location.to_string()));
            }

            path.push(relative);
        }

        Ok(path)
    }
}

impl Storage for LocalObjectStore {
    fn get(&self, location: &ObjectLocation) -> Result<Vec<u8>, StorageError> {
        let path = self.resolve(location)?;

        fs::read(&path).map_err(|error| match error.kind() {
            ErrorKind::NotFound => StorageError::NotFound {
                bucket: location.bucket.clone(),
                key: location.key.clone()
            },
            _ => StorageError::io(&path, error)
        })
    }

    fn put(&self, location: &ObjectLocation, object: StoredObject) -> Result<(), StorageError> {
        let path = self.resolve(location)?;
        let parent = path.parent().ok_or_else(|| StorageError::InvalidKey(location.to_string()))?;

        fs::create_dir_all(parent).map_err(|error| StorageError::io(parent, error))?;

        //NOTE: Written to a sibling temp file first and renamed into place so readers never see a partial object
        let mut file = NamedTempFile::new_in(parent).map_err(|error| StorageError::io(parent, error))?;
        file.write_all(&object.body).map_err(|error| StorageError::io(file.path(), error))?;
        file.persist(&path).map_err(|error| StorageError::io(&path, error.error))?;

        debug!("Stored [{location}] as {} ({} bytes) with metadata {:?}", object.content_type, object.body.len(), object.metadata);

        Ok(())
    }
}
