mod batch;
mod enriched;
mod raw_record;
mod transaction;

use std::fmt;
use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};

pub use batch::{BatchResult, DroppedRecord, SinkResult};
pub use enriched::EnrichedRecord;
pub use raw_record::RawRecord;
pub use transaction::TransactionRecord;

pub const PROCESSED_BY: &str = "transaction-etl";

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum TransactionType {
    Income,
    Expense,
    Other(String)
}

impl TransactionType {
    /// Parses a raw type value. Unknown values are kept verbatim rather than rejected.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();

        if value.is_empty() {
            return None;
        }

        Some(match value.to_lowercase().as_str() {
            "income" => TransactionType::Income,
            "expense" => TransactionType::Expense,
            _ => TransactionType::Other(value.to_string())
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
            TransactionType::Other(value) => value
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl Serialize for TransactionType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
