mod config;
mod dispatcher;
mod errors;
mod postgres;

use std::future::Future;

use chrono::{DateTime, Utc};

pub use config::{SinkConfig, SinkSettings};
pub use dispatcher::SinkDispatcher;
pub use errors::SinkError;
pub use postgres::PostgresSink;

use crate::models::EnrichedRecord;

/// The rows of one batch, plus the provenance columns stored alongside them.
#[derive(Debug, Clone, Copy)]
pub struct SinkLoad<'a> {
    pub records: &'a [EnrichedRecord],
    pub source_file: &'a str,
    pub processed_at: DateTime<Utc>,
    pub processed_by: &'a str
}

/// A secondary destination for enriched records.
pub trait Sink: Send + Sync {
    /// Loads the batch and returns the number of rows written.
    fn load(&self, settings: &SinkSettings, load: SinkLoad<'_>) -> impl Future<Output = Result<u64, SinkError>> + Send;
}
