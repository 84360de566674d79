use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::TransactionRecord;
use crate::types::AmountCategory;

/// A normalized transaction plus the fields derived from it.
///
/// Derived fields depend only on the wrapped record and the threshold table
/// used to build it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub transaction: TransactionRecord,
    pub amount_abs: Decimal,
    pub amount_category: AmountCategory,
    /// English weekday name of `date`, e.g. `"Friday"`.
    pub day_of_week: String,
    /// ISO-8601 weekday number of `date`, Monday = 1 through Sunday = 7.
    pub iso_weekday: u32,
    pub month: u32,
    pub year: i32
}
