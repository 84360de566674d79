use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Object [{bucket}/{key}] was not found")]
    NotFound {
        bucket: String,
        key: String
    },
    #[error("Object key [{0}] is not a valid relative path")]
    InvalidKey(String),
    #[error("Storage I/O error at [{path}]: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error
    }
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
