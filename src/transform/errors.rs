use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Format error: input has no header line")]
    MissingHeader,
    #[error("Format error: header is missing required column [{0}]")]
    MissingColumn(&'static str),
    #[error("Format error: header repeats column [{0}]")]
    DuplicateColumn(String),
    #[error("Format error: line {line} has {found} fields, expected {expected}")]
    RaggedRow {
        line: u64,
        expected: u64,
        found: u64
    },
    #[error("Format error: line {line} is not valid UTF-8")]
    InvalidUtf8 {
        line: u64
    },
    #[error("Format error: {0}")]
    Csv(#[from] csv::Error)
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("Empty result: all {records_read} records were dropped ({records_dropped} drops)")]
    EmptyResult {
        records_read: usize,
        records_dropped: usize
    }
}
