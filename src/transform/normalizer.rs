use std::collections::HashSet;

use crate::models::{DroppedRecord, RawRecord, TransactionRecord};

#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub records: Vec<TransactionRecord>,
    pub dropped: Vec<DroppedRecord>
}

/// Normalizes every raw record and filters out the ones that fail.
///
/// A record is dropped when a required field is missing or cannot be coerced,
/// or when its `transaction_id` was already seen earlier in the same batch.
/// Surviving records keep their input order, and
/// `records.len() + dropped.len() == raw_records.len()` always holds.
pub fn normalize(raw_records: &[RawRecord]) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();
    let mut seen_ids = HashSet::with_capacity(raw_records.len());

    for raw in raw_records {
        let transaction_id = Some(raw.trimmed("transaction_id"))
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        match TransactionRecord::from_raw(raw) {
            Ok(record) if !seen_ids.insert(record.transaction_id.clone()) => {
                batch.dropped.push(DroppedRecord {
                    line: raw.line,
                    transaction_id,
                    reason: "Duplicate transaction_id within the batch".to_string()
                });
            },
            Ok(record) => batch.records.push(record),
            Err(error) => {
                batch.dropped.push(DroppedRecord {
                    line: raw.line,
                    transaction_id,
                    reason: error.to_string()
                });
            }
        }
    }

    batch
}
