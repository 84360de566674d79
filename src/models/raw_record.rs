use std::collections::HashMap;

/// A single untyped row as read from the input, keyed by column name.
///
/// Nothing in a `RawRecord` has been validated yet; it only becomes a
/// `TransactionRecord` once it passes normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based line in the source file, used when reporting dropped rows.
    pub line: u64,
    fields: HashMap<String, String>
}

impl RawRecord {
    pub fn new(line: u64, fields: HashMap<String, String>) -> Self {
        Self { line, fields }
    }

    /// Returns the raw value of a column, or `None` when the column is absent from the input.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Returns the trimmed value of a column, treating an absent column as empty.
    pub fn trimmed(&self, column: &str) -> &str {
        self.get(column).map(str::trim).unwrap_or("")
    }
}
