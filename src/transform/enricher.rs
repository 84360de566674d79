use chrono::Datelike;

use crate::models::{EnrichedRecord, TransactionRecord};
use crate::types::AmountThresholds;

/// Derives the analysis fields of a record. Pure and total.
#[derive(Debug, Clone, Default)]
pub struct Enricher {
    thresholds: AmountThresholds
}

impl Enricher {
    pub fn new(thresholds: AmountThresholds) -> Self {
        Self { thresholds }
    }

    pub fn enrich(&self, transaction: TransactionRecord) -> EnrichedRecord {
        let amount_abs = transaction.amount.abs();
        let weekday = transaction.date.weekday();

        EnrichedRecord {
            amount_abs,
            amount_category: self.thresholds.categorize(amount_abs),
            day_of_week: weekday_name(weekday).to_string(),
            iso_weekday: weekday.number_from_monday(),
            month: transaction.date.month(),
            year: transaction.date.year(),
            transaction
        }
    }
}

fn weekday_name(weekday: chrono::Weekday) -> &'static str {
    match weekday {
        chrono::Weekday::Mon => "Monday",
        chrono::Weekday::Tue => "Tuesday",
        chrono::Weekday::Wed => "Wednesday",
        chrono::Weekday::Thu => "Thursday",
        chrono::Weekday::Fri => "Friday",
        chrono::Weekday::Sat => "Saturday",
        chrono::Weekday::Sun => "Sunday"
    }
}
