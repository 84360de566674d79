use super::{read_records, serialize, FormatError, TransformError, Transformer};

use anyhow::{anyhow, Result};
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use std::fmt::Write;

use crate::models::{BatchResult, SinkResult};
use crate::types::{AmountCategory, AmountThresholds};

const HEADER: &str = "transaction_id,date,timestamp,amount,category,description,transaction_type,account,location";

fn create_csv(rows: &[&str]) -> String {
    let mut csv = String::from(HEADER);

    for row in rows {
        csv.push('\n');
        csv.push_str(row);
    }

    csv
}

fn create_generated_csv(count: usize) -> Result<String> {
    let mut csv = String::from(HEADER);

    for index in 0..count {
        let amount = if index % 3 == 0 { format!("{}.{:02}", 500 + index * 37, index % 100) } else { format!("-{}.{:02}", 10 + index * 5, index % 100) };
        write!(
            csv,
            "\nTXN_20240726_{:04},2024-07-26,2024-07-26 {:02}:15:00,{amount},food,groceries,expense,checking,Online",
            index + 1,
            6 + index % 17
        )?;
    }

    Ok(csv)
}

#[test]
fn test_reader_preserves_input_order_and_lines() -> Result<()> {
    let csv = create_csv(&[
        "TXN_1,2024-07-26,,10.00,,,,,",
        "TXN_2,2024-07-27,,20.00,,,,,",
    ]);

    let records = read_records(csv.as_bytes())?;

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("transaction_id"), Some("TXN_1"));
    assert_eq!(records[1].get("amount"), Some("20.00"));
    assert_eq!(records[0].line, 2);
    assert_eq!(records[1].line, 3);

    Ok(())
}

#[test]
fn test_reader_rejects_malformed_input() {
    assert!(matches!(read_records(b""), Err(FormatError::MissingHeader)));
    assert!(matches!(read_records(b"transaction_id,date\nTXN_1,2024-07-26"), Err(FormatError::MissingColumn("amount"))));
    assert!(matches!(read_records(b"transaction_id,date,amount,date\n"), Err(FormatError::DuplicateColumn(_))));

    let ragged = read_records(b"transaction_id,date,amount\nTXN_1,2024-07-26,1.00\nTXN_2,2024-07-26\n");
    assert!(matches!(ragged, Err(FormatError::RaggedRow { line: 3, expected: 3, found: 2 })));

    let invalid_utf8 = read_records(b"transaction_id,date,amount\nTXN_1,2024-07-26,\xff\n");
    assert!(matches!(invalid_utf8, Err(FormatError::InvalidUtf8 { .. })));
}

#[test]
fn test_reader_accepts_header_without_optional_columns() -> Result<()> {
    let records = read_records(b"amount,transaction_id,date,extra\n5,TXN_1,2024-07-26,ignored\n")?;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("location"), None);

    Ok(())
}

#[test]
fn test_transform_keeps_every_well_formed_row() -> Result<()> {
    let csv = create_generated_csv(75)?;
    let output = Transformer::default().transform(csv.as_bytes())?;

    assert_eq!(output.records_read, 75);
    assert_eq!(output.records.len(), 75);
    assert!(output.dropped.is_empty());

    Ok(())
}

#[test]
fn test_transform_drops_row_with_empty_amount() -> Result<()> {
    let csv = create_csv(&[
        "TXN_1,2024-07-26,2024-07-26 10:00:00,-12.50,food,groceries,expense,checking,Online",
        "TXN_2,2024-07-26,2024-07-26 11:00:00,,food,restaurant,expense,checking,Online",
        "TXN_3,2024-07-26,2024-07-26 12:00:00,2500.00,salary,monthly salary,income,savings,Chicago",
    ]);

    let output = Transformer::default().transform(csv.as_bytes())?;

    assert_eq!(output.records.len(), 2);
    assert_eq!(output.dropped.len(), 1);
    assert_eq!(output.records.len() + output.dropped.len(), output.records_read);
    assert_eq!(output.dropped[0].line, 3);
    assert_eq!(output.dropped[0].transaction_id.as_deref(), Some("TXN_2"));

    Ok(())
}

#[test]
fn test_transform_fails_when_every_row_lacks_an_id() {
    let csv = create_csv(&[
        ",2024-07-26,,10.00,,,,,",
        "  ,2024-07-26,,20.00,,,,,",
    ]);

    let result = Transformer::default().transform(csv.as_bytes());

    assert!(matches!(result, Err(TransformError::EmptyResult { records_read: 2, records_dropped: 2 })));
}

#[test]
fn test_transform_fails_on_header_only_input() {
    let result = Transformer::default().transform(HEADER.as_bytes());

    assert!(matches!(result, Err(TransformError::EmptyResult { records_read: 0, .. })));
}

#[test]
fn test_transform_drops_duplicate_and_malformed_rows() -> Result<()> {
    let csv = create_csv(&[
        "TXN_1,2024-07-26,,10.00,,,,,",
        "TXN_1,2024-07-26,,99.00,,,,,",
        "TXN_2,not-a-date,,10.00,,,,,",
        "TXN_3,2024-07-26,,ten,,,,,",
        "TXN_4,2024-07-26,garbage,1.00,,,,,",
    ]);

    let output = Transformer::default().transform(csv.as_bytes())?;
    let kept: Vec<_> = output.records.iter().map(|record| record.transaction.transaction_id.as_str()).collect();

    assert_eq!(kept, vec!["TXN_1", "TXN_4"]);
    assert_eq!(output.records[0].transaction.amount.to_string(), "10.00");
    assert_eq!(output.dropped.len(), 3);

    Ok(())
}

#[test]
fn test_enrichment_of_negative_boundary_amount() -> Result<()> {
    let csv = create_csv(&["TXN_1,2024-07-26,2024-07-26 09:00:00,-100.00,shopping,electronics,expense,credit_card,Houston"]);
    let output = Transformer::default().transform(csv.as_bytes())?;
    let record = output.records.first().ok_or_else(|| anyhow!("record missing"))?;

    assert_eq!(record.amount_abs.to_string(), "100.00");
    assert_eq!(record.amount_category, AmountCategory::Medium);
    assert_eq!(record.day_of_week, "Friday");
    assert_eq!(record.iso_weekday, 5);
    assert_eq!(record.month, 7);
    assert_eq!(record.year, 2024);

    Ok(())
}

#[test]
fn test_amount_abs_is_the_magnitude_of_every_amount() -> Result<()> {
    let csv = create_generated_csv(40)?;
    let output = Transformer::default().transform(csv.as_bytes())?;

    for record in &output.records {
        assert!(!record.amount_abs.is_sign_negative());
        assert_eq!(record.amount_abs, record.transaction.amount.abs());
    }

    Ok(())
}

#[test]
fn test_custom_thresholds_change_categories() -> Result<()> {
    let thresholds = AmountThresholds::new(Decimal::from(25), Decimal::from(100), Decimal::from(500))?;
    let csv = create_csv(&[
        "TXN_1,2024-07-26,,-24.99,,,,,",
        "TXN_2,2024-07-26,,25,,,,,",
        "TXN_3,2024-07-26,,-499.99,,,,,",
        "TXN_4,2024-07-26,,500.00,,,,,",
    ]);

    let output = Transformer::new(thresholds).transform(csv.as_bytes())?;
    let categories: Vec<_> = output.records.iter().map(|record| record.amount_category).collect();

    assert_eq!(categories, vec![AmountCategory::Small, AmountCategory::Medium, AmountCategory::Large, AmountCategory::VeryLarge]);

    Ok(())
}

#[test]
fn test_serialized_payload_keeps_decimal_text_and_all_fields() -> Result<()> {
    let csv = create_csv(&["TXN_1,2024-07-26,2024-07-26 09:05:00,-0.10,food,pharmacy,expense,checking,los angeles"]);
    let output = Transformer::default().transform(csv.as_bytes())?;
    let processed_at = Utc.with_ymd_and_hms(2024, 7, 26, 23, 0, 0).single().ok_or_else(|| anyhow!("bad time"))?;
    let batch = BatchResult::new("raw-data/file.csv", processed_at, output.records_read, output.records, output.dropped, SinkResult::Skipped);

    let payload: Value = serde_json::from_slice(&serialize(&batch)?)?;
    let record = &payload["records"][0];

    assert_eq!(record["transaction_id"], "TXN_1");
    assert_eq!(record["date"], "2024-07-26");
    assert_eq!(record["timestamp"], "2024-07-26T09:05:00");
    assert_eq!(record["amount"], "-0.10");
    assert_eq!(record["amount_abs"], "0.10");
    assert_eq!(record["amount_category"], "small");
    assert_eq!(record["category"], "Food");
    assert_eq!(record["description"], "Pharmacy");
    assert_eq!(record["transaction_type"], "expense");
    assert_eq!(record["account"], "checking");
    assert_eq!(record["location"], "Los Angeles");
    assert_eq!(record["day_of_week"], "Friday");
    assert_eq!(record["month"], 7);
    assert_eq!(record["year"], 2024);

    let metadata = &payload["metadata"];
    assert_eq!(metadata["source_file"], "raw-data/file.csv");
    assert_eq!(metadata["schema_version"], "1.0");
    assert_eq!(metadata["records_read"], 1);
    assert_eq!(metadata["records_dropped"], 0);
    assert_eq!(metadata["records_written"], 1);
    assert_eq!(metadata["sink"]["status"], "skipped");
    assert_eq!(metadata["processed_at"], "2024-07-26T23:00:00Z");

    Ok(())
}

#[test]
fn test_serialization_is_deterministic_apart_from_processed_at() -> Result<()> {
    let csv = create_generated_csv(20)?;
    let transformer = Transformer::default();
    let mut payloads = Vec::new();

    for hour in [1, 1, 2] {
        let output = transformer.transform(csv.as_bytes())?;
        let processed_at = Utc.with_ymd_and_hms(2024, 7, 26, hour, 0, 0).single().ok_or_else(|| anyhow!("bad time"))?;
        let batch = BatchResult::new("raw-data/file.csv", processed_at, output.records_read, output.records, output.dropped, SinkResult::Skipped);
        payloads.push(serialize(&batch)?);
    }

    assert_eq!(payloads[0], payloads[1]);
    assert_ne!(payloads[1], payloads[2]);

    let mut first: Value = serde_json::from_slice(&payloads[1])?;
    let mut second: Value = serde_json::from_slice(&payloads[2])?;
    first["metadata"]["processed_at"] = Value::Null;
    second["metadata"]["processed_at"] = Value::Null;

    assert_eq!(first, second);

    Ok(())
}
