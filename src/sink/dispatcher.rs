use std::time::Duration;

use tokio::time::timeout;
use tracing::{info, warn};

use crate::models::SinkResult;
use crate::sink::{Sink, SinkConfig, SinkError, SinkLoad};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Best-effort secondary load. Never fails the invocation: every outcome is a `SinkResult`.
pub struct SinkDispatcher<S: Sink> {
    config: SinkConfig,
    sink: S,
    timeout: Duration
}

impl<S: Sink> SinkDispatcher<S> {
    pub fn new(config: SinkConfig, sink: S) -> Self {
        Self {
            config,
            sink,
            timeout: DEFAULT_TIMEOUT
        }
    }

    /// Bounds how long a single load may take before it is reported as failed.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn dispatch(&self, load: SinkLoad<'_>) -> SinkResult {
        let settings = match self.config.settings() {
            Ok(Some(settings)) => settings,
            Ok(None) => {
                info!("Sink not configured (missing {:?}), skipping database load", self.config.missing());
                return SinkResult::Skipped;
            },
            Err(error) => {
                warn!("{error}");
                return SinkResult::Failed { reason: error.to_string() };
            }
        };

        info!("Loading {} records into [{}] at {}:{}/{}", load.records.len(), settings.table, settings.host, settings.port, settings.database);

        let result = timeout(self.timeout, self.sink.load(&settings, load)).await
            .unwrap_or_else(|_| Err(SinkError::Unavailable(format!("load timed out after {:?}", self.timeout))));

        match result {
            Ok(rows) => {
                info!("Loaded {rows} records into [{}]", settings.table);
                SinkResult::Succeeded { rows }
            },
            Err(error) => {
                warn!("Database load failed, continuing without it: {error}");
                SinkResult::Failed { reason: error.to_string() }
            }
        }
    }
}
