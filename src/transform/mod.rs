mod enricher;
mod errors;
mod normalizer;
mod reader;
mod serializer;
#[cfg(test)]
mod tests;

pub use enricher::Enricher;
pub use errors::{FormatError, TransformError};
pub use normalizer::{normalize, NormalizedBatch};
pub use reader::read_records;
pub use serializer::serialize;

use tracing::{info, warn};

use crate::models::{DroppedRecord, EnrichedRecord};
use crate::types::AmountThresholds;

/// Records that survived filtering, enriched, together with the counts the envelope reports.
#[derive(Debug, Clone)]
pub struct TransformOutput {
    pub records_read: usize,
    pub records: Vec<EnrichedRecord>,
    pub dropped: Vec<DroppedRecord>
}

/// Read → normalize/filter → enrich for one input file.
pub struct Transformer {
    enricher: Enricher
}

impl Transformer {
    pub fn new(thresholds: AmountThresholds) -> Self {
        Self {
            enricher: Enricher::new(thresholds)
        }
    }

    /// Runs the record-level part of the pipeline over raw CSV bytes.
    ///
    /// # Errors
    /// Returns `TransformError::Format` for a malformed file and
    /// `TransformError::EmptyResult` when no record survives filtering.
    pub fn transform(&self, input: &[u8]) -> Result<TransformOutput, TransformError> {
        let raw_records = read_records(input)?;
        let records_read = raw_records.len();
        info!("Read {records_read} records");

        let NormalizedBatch { records, dropped } = normalize(&raw_records);

        for dropped_record in &dropped {
            warn!(
                "Dropped record on line [{}] transaction [{}]: {}",
                dropped_record.line,
                dropped_record.transaction_id.as_deref().unwrap_or("-"),
                dropped_record.reason
            );
        }

        if records.is_empty() {
            return Err(TransformError::EmptyResult { records_read, records_dropped: dropped.len() });
        }

        let records: Vec<EnrichedRecord> = records.into_iter()
            .map(|record| self.enricher.enrich(record))
            .collect();

        info!("Transformations completed, kept {} of {records_read} records", records.len());

        Ok(TransformOutput { records_read, records, dropped })
    }
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new(AmountThresholds::default())
    }
}
