use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::task::spawn_blocking;
use tracing::info;

use crate::engine::errors::EtlError;
use crate::engine::event::TriggerEvent;
use crate::models::{BatchResult, SinkResult, PROCESSED_BY};
use crate::sink::{Sink, SinkDispatcher, SinkLoad};
use crate::storage::{processed_key, ObjectLocation, Storage, StoredObject, RAW_PREFIX};
use crate::transform::{serialize, Transformer};

const OUTPUT_CONTENT_TYPE: &str = "application/json";
const PROCESSING_STAGE: &str = "transformed";

/// Counts and destinations of a completed invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationReport {
    pub source_file: String,
    pub output_key: String,
    pub records_read: usize,
    pub records_dropped: usize,
    pub records_written: usize,
    pub sink: SinkResult
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum InvocationOutcome {
    Processed(InvocationReport),
    /// The object is not an input of this pipeline; nothing was read or written.
    Skipped {
        source_file: String,
        reason: String
    }
}

/// Runs one invocation per trigger event. Holds no per-invocation state, so a
/// single engine can serve any number of independent events.
pub struct EtlEngine<T: Storage, S: Sink> {
    storage: Arc<T>,
    transformer: Transformer,
    dispatcher: SinkDispatcher<S>
}

impl<T: Storage, S: Sink> EtlEngine<T, S> {
    pub fn new(storage: Arc<T>, transformer: Transformer, dispatcher: SinkDispatcher<S>) -> Self {
        Self {
            storage,
            transformer,
            dispatcher
        }
    }

    /// Reads the object named by the event, transforms it, runs the optional sink
    /// and writes the JSON artifact next to the input under `processed-data/`.
    ///
    /// # Errors
    /// Returns `EtlError` when the input cannot be read or parsed, when every
    /// record is dropped, or when the output cannot be written. In all of these
    /// cases no output object exists afterwards.
    pub async fn handle(&self, event: &TriggerEvent) -> Result<InvocationOutcome, EtlError> {
        let location = &event.location;
        info!("Processing file: {location}");

        let Some(output_key) = processed_key(&location.key) else {
            info!("Skipping [{location}]: not in {RAW_PREFIX}");
            return Ok(InvocationOutcome::Skipped {
                source_file: location.key.clone(),
                reason: format!("not in {RAW_PREFIX}")
            });
        };

        let processed_at = Utc::now();
        let input = self.read(location).await?;

        let output = self.transformer.transform(&input)
            .map_err(|error| EtlError::from_transform(error, &location.key))?;

        let sink = self.dispatcher.dispatch(SinkLoad {
            records: &output.records,
            source_file: &location.key,
            processed_at,
            processed_by: PROCESSED_BY
        }).await;

        let batch = BatchResult::new(&location.key, processed_at, output.records_read, output.records, output.dropped, sink);
        let metadata = &batch.metadata;

        let report = InvocationReport {
            source_file: location.key.clone(),
            output_key: output_key.clone(),
            records_read: metadata.records_read,
            records_dropped: metadata.records_dropped,
            records_written: metadata.records_written,
            sink: metadata.sink.clone()
        };

        let object = StoredObject {
            body: serialize(&batch)?,
            content_type: OUTPUT_CONTENT_TYPE.to_string(),
            metadata: BTreeMap::from([
                ("original_file".to_string(), location.key.clone()),
                ("processed_at".to_string(), processed_at.to_rfc3339()),
                ("record_count".to_string(), metadata.records_written.to_string()),
                ("processing_stage".to_string(), PROCESSING_STAGE.to_string())
            ])
        };

        let output_location = ObjectLocation::new(location.bucket.clone(), output_key);
        self.write(&output_location, object).await?;

        info!(
            "Processed [{location}]: read {}, dropped {}, written {}, sink {} -> [{output_location}]",
            report.records_read, report.records_dropped, report.records_written, report.sink.status()
        );

        Ok(InvocationOutcome::Processed(report))
    }

    async fn read(&self, location: &ObjectLocation) -> Result<Vec<u8>, EtlError> {
        let storage = self.storage.clone();
        let location = location.clone();

        Ok(spawn_blocking(move || storage.get(&location)).await??)
    }

    async fn write(&self, location: &ObjectLocation, object: StoredObject) -> Result<(), EtlError> {
        let storage = self.storage.clone();
        let location = location.clone();

        Ok(spawn_blocking(move || storage.put(&location, object)).await??)
    }
}
