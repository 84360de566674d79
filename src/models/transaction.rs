use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::models::{RawRecord, TransactionType};
use crate::types::{parse_amount, parse_date, parse_timestamp, title_case, FieldError, TransactionId};

/// A normalized transaction with every required field present and well-typed.
///
/// Optional fields are `None` when the input left them empty (or, for the
/// timestamp, when the value could not be parsed).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRecord {
    pub transaction_id: TransactionId,
    pub date: NaiveDate,
    pub timestamp: Option<NaiveDateTime>,
    /// Signed amount. Serialized as a string so the original cents survive untouched.
    pub amount: Decimal,
    pub category: Option<String>,
    pub description: Option<String>,
    pub transaction_type: Option<TransactionType>,
    pub account: Option<String>,
    pub location: Option<String>
}

impl TransactionRecord {
    /// Cleans and coerces a raw row.
    ///
    /// # Errors
    /// Returns `FieldError` if `transaction_id`, `date` or `amount` is missing or cannot be coerced.
    /// Malformed optional fields never fail a record.
    pub fn from_raw(raw: &RawRecord) -> Result<Self, FieldError> {
        let transaction_id = raw.trimmed("transaction_id");

        if transaction_id.is_empty() {
            return Err(FieldError::Missing { field: "transaction_id" });
        }

        let date = parse_date(raw.trimmed("date"))?;
        let amount = parse_amount(raw.trimmed("amount"))?;

        let timestamp = parse_timestamp(raw.trimmed("timestamp")).unwrap_or_else(|error| {
            debug!("Line [{}] transaction [{transaction_id}]: {error}, timestamp set to null", raw.line);
            None
        });

        Ok(Self {
            transaction_id: transaction_id.to_string(),
            date,
            timestamp,
            amount,
            category: titled(raw, "category"),
            description: titled(raw, "description"),
            transaction_type: TransactionType::parse(raw.trimmed("transaction_type")),
            account: non_empty(raw.trimmed("account")).map(str::to_string),
            location: titled(raw, "location")
        })
    }
}

fn titled(raw: &RawRecord, column: &str) -> Option<String> {
    non_empty(raw.trimmed(column)).map(title_case)
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() { None } else { Some(value) }
}
