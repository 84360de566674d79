use thiserror::Error;

use crate::storage::StorageError;
use crate::transform::{FormatError, TransformError};

/// Failures that abort an invocation. No output object is written for any of them.
#[derive(Debug, Error)]
pub enum EtlError {
    #[error("Invalid trigger event: {0}")]
    InvalidEvent(String),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("Empty result for [{source_file}]: all {records_read} records were dropped")]
    EmptyResult {
        source_file: String,
        records_read: usize
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Failed to serialize the batch: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Storage task did not complete: {0}")]
    Task(#[from] tokio::task::JoinError)
}

impl EtlError {
    pub fn from_transform(error: TransformError, source_file: &str) -> Self {
        match error {
            TransformError::Format(error) => Self::Format(error),
            TransformError::EmptyResult { records_read, .. } => Self::EmptyResult {
                source_file: source_file.to_string(),
                records_read
            }
        }
    }
}
