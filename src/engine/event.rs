use serde::Deserialize;
use tracing::warn;

use crate::engine::errors::EtlError;
use crate::storage::ObjectLocation;

#[derive(Debug, Deserialize)]
struct NotificationEvent {
    #[serde(rename = "Records", default)]
    records: Vec<NotificationRecord>
}

#[derive(Debug, Deserialize)]
struct NotificationRecord {
    s3: NotificationEntity
}

#[derive(Debug, Deserialize)]
struct NotificationEntity {
    bucket: NotificationBucket,
    object: NotificationObject
}

#[derive(Debug, Deserialize)]
struct NotificationBucket {
    name: String
}

#[derive(Debug, Deserialize)]
struct NotificationObject {
    key: String
}

/// The object-created notification that starts an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerEvent {
    pub location: ObjectLocation
}

impl TriggerEvent {
    pub fn new(location: ObjectLocation) -> Self {
        Self { location }
    }

    /// Parses an S3-style notification and keeps its first record.
    ///
    /// # Errors
    /// Returns `EtlError::InvalidEvent` if the payload is not a notification or names no object.
    pub fn from_json(payload: &[u8]) -> Result<Self, EtlError> {
        let event: NotificationEvent = serde_json::from_slice(payload)
            .map_err(|error| EtlError::InvalidEvent(error.to_string()))?;

        if event.records.len() > 1 {
            warn!("Event carries {} records, only the first one is processed", event.records.len());
        }

        let record = event.records.into_iter()
            .next()
            .ok_or_else(|| EtlError::InvalidEvent("event contains no records".to_string()))?;

        let NotificationEntity { bucket, object } = record.s3;

        if bucket.name.is_empty() || object.key.is_empty() {
            return Err(EtlError::InvalidEvent("event names an empty bucket or key".to_string()));
        }

        Ok(Self::new(ObjectLocation::new(bucket.name, object.key)))
    }
}
