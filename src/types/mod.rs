mod coercion;
mod errors;
mod text;
mod thresholds;

pub use coercion::{parse_amount, parse_date, parse_timestamp};
pub use errors::FieldError;
pub use text::title_case;
pub use thresholds::{AmountCategory, AmountThresholds};

pub type TransactionId = String;
