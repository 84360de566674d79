use std::fmt;
use std::fmt::{Display, Formatter};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::errors::ThresholdError;

const DEFAULT_MEDIUM: i64 = 100;
const DEFAULT_LARGE: i64 = 1_000;
const DEFAULT_VERY_LARGE: i64 = 10_000;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountCategory {
    Small,
    Medium,
    Large,
    VeryLarge
}

impl AmountCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AmountCategory::Small => "small",
            AmountCategory::Medium => "medium",
            AmountCategory::Large => "large",
            AmountCategory::VeryLarge => "very_large"
        }
    }
}

impl Display for AmountCategory {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Ordered bucket table used to categorize transaction magnitudes.
///
/// Each entry is the inclusive lower bound of a category. Anything below the
/// first bound is `Small`, so the table partitions the non-negative amounts
/// without gaps or overlaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountThresholds {
    table: [(Decimal, AmountCategory); 3]
}

impl AmountThresholds {
    /// Builds a table from the lower bounds of `Medium`, `Large` and `VeryLarge`.
    ///
    /// # Errors
    /// Returns `ThresholdError` if a bound is negative or the bounds are not strictly ascending.
    pub fn new(medium: Decimal, large: Decimal, very_large: Decimal) -> Result<Self, ThresholdError> {
        if medium.is_sign_negative() && !medium.is_zero() {
            return Err(ThresholdError::Negative(medium));
        }

        for (previous, next) in [(medium, large), (large, very_large)] {
            if previous >= next {
                return Err(ThresholdError::NotAscending { previous, next });
            }
        }

        Ok(Self {
            table: [
                (medium, AmountCategory::Medium),
                (large, AmountCategory::Large),
                (very_large, AmountCategory::VeryLarge)
            ]
        })
    }

    /// Returns the category of an amount by its magnitude. The sign is ignored.
    pub fn categorize(&self, amount: Decimal) -> AmountCategory {
        let magnitude = amount.abs();

        self.table.iter()
            .rev()
            .find(|(lower_bound, _)| magnitude >= *lower_bound)
            .map(|(_, category)| *category)
            .unwrap_or(AmountCategory::Small)
    }

    pub fn bounds(&self) -> impl Iterator<Item = (Decimal, AmountCategory)> + '_ {
        self.table.iter().copied()
    }
}

impl Default for AmountThresholds {
    fn default() -> Self {
        Self {
            table: [
                (Decimal::from(DEFAULT_MEDIUM), AmountCategory::Medium),
                (Decimal::from(DEFAULT_LARGE), AmountCategory::Large),
                (Decimal::from(DEFAULT_VERY_LARGE), AmountCategory::VeryLarge)
            ]
        }
    }
}
