use std::collections::{HashMap, HashSet};

use csv::{ErrorKind, ReaderBuilder, StringRecord};
use tracing::debug;

use crate::models::RawRecord;
use crate::transform::errors::FormatError;

pub const REQUIRED_COLUMNS: [&str; 3] = ["transaction_id", "date", "amount"];
pub const OPTIONAL_COLUMNS: [&str; 6] = ["timestamp", "category", "description", "transaction_type", "account", "location"];

/// Parses CSV bytes into raw records, in input order.
///
/// The header must name every column in `REQUIRED_COLUMNS`; optional columns may
/// be absent and unknown columns are carried along untouched.
///
/// # Errors
/// Returns `FormatError` if the header is missing, incomplete or repeats a column,
/// or if any row has a different number of fields than the header.
pub fn read_records(input: &[u8]) -> Result<Vec<RawRecord>, FormatError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(input);

    let header: Vec<String> = reader.headers()
        .map_err(classify)?
        .iter()
        .map(|column| column.trim().to_string())
        .collect();

    validate_header(&header)?;

    let mut records = Vec::new();

    for result in reader.records() {
        let record = result.map_err(classify)?;
        records.push(to_raw_record(&header, &record));
    }

    Ok(records)
}

fn validate_header(header: &[String]) -> Result<(), FormatError> {
    if header.iter().all(|column| column.is_empty()) {
        return Err(FormatError::MissingHeader);
    }

    let mut seen = HashSet::with_capacity(header.len());

    for column in header {
        if !seen.insert(column.as_str()) {
            return Err(FormatError::DuplicateColumn(column.clone()));
        }
    }

    if let Some(missing) = REQUIRED_COLUMNS.iter().find(|column| !seen.contains(*column)) {
        return Err(FormatError::MissingColumn(*missing));
    }

    for column in OPTIONAL_COLUMNS.iter().filter(|column| !seen.contains(*column)) {
        debug!("Optional column [{column}] is absent from the input");
    }

    Ok(())
}

fn to_raw_record(header: &[String], record: &StringRecord) -> RawRecord {
    let line = record.position().map(|position| position.line()).unwrap_or_default();

    let fields: HashMap<String, String> = header.iter()
        .zip(record.iter())
        .map(|(column, value)| (column.clone(), value.to_string()))
        .collect();

    RawRecord::new(line, fields)
}

fn classify(error: csv::Error) -> FormatError {
    let classified = match error.kind() {
        ErrorKind::UnequalLengths { pos, expected_len, len } => Some(FormatError::RaggedRow {
            line: pos.as_ref().map(|position| position.line()).unwrap_or_default(),
            expected: *expected_len,
            found: *len
        }),
        ErrorKind::Utf8 { pos, .. } => Some(FormatError::InvalidUtf8 {
            line: pos.as_ref().map(|position| position.line()).unwrap_or(1)
        }),
        _ => None
    };

    match classified {
        Some(format_error) => format_error,
        None => FormatError::Csv(error)
    }
}
