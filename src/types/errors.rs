use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Required field [{field}] is missing or empty")]
    Missing {
        field: &'static str
    },
    #[error("Field [amount] has an invalid decimal value [{value}]: {reason}")]
    InvalidAmount {
        value: String,
        reason: String
    },
    #[error("Field [{field}] has an invalid date value [{value}]")]
    InvalidDate {
        field: &'static str,
        value: String
    },
    #[error("Field [timestamp] has an invalid date-time value [{value}]")]
    InvalidTimestamp {
        value: String
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ThresholdError {
    #[error("Threshold error: boundary [{0}] is negative")]
    Negative(Decimal),
    #[error("Threshold error: boundaries must be strictly ascending, [{previous}] is not below [{next}]")]
    NotAscending {
        previous: Decimal,
        next: Decimal
    }
}
