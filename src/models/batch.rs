use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{EnrichedRecord, PROCESSED_BY};
use crate::types::TransactionId;

pub const SCHEMA_VERSION: &str = "1.0";

/// A row excluded by the record filter. Drops are data-quality warnings, not failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedRecord {
    pub line: u64,
    pub transaction_id: Option<TransactionId>,
    pub reason: String
}

/// Outcome of the optional secondary load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SinkResult {
    /// The sink is not configured.
    Skipped,
    Succeeded {
        rows: u64
    },
    /// The sink was configured but the load did not complete. Never fatal.
    Failed {
        reason: String
    }
}

impl SinkResult {
    pub fn status(&self) -> &'static str {
        match self {
            SinkResult::Skipped => "skipped",
            SinkResult::Succeeded { .. } => "succeeded",
            SinkResult::Failed { .. } => "failed"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchMetadata {
    pub source_file: String,
    pub schema_version: &'static str,
    pub processed_by: &'static str,
    pub processed_at: DateTime<Utc>,
    pub records_read: usize,
    pub records_dropped: usize,
    pub records_written: usize,
    pub dropped: Vec<DroppedRecord>,
    pub sink: SinkResult
}

/// Everything produced by one invocation: the envelope plus the enriched records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    pub metadata: BatchMetadata,
    pub records: Vec<EnrichedRecord>
}

impl BatchResult {
    pub fn new(
        source_file: &str,
        processed_at: DateTime<Utc>,
        records_read: usize,
        records: Vec<EnrichedRecord>,
        dropped: Vec<DroppedRecord>,
        sink: SinkResult
    ) -> Self {
        Self {
            metadata: BatchMetadata {
                source_file: source_file.to_string(),
                schema_version: SCHEMA_VERSION,
                processed_by: PROCESSED_BY,
                processed_at,
                records_read,
                records_dropped: dropped.len(),
                records_written: records.len(),
                dropped,
                sink
            },
            records
        }
    }
}
