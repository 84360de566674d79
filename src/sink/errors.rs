use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Sink error: port [{0}] is not a valid port number")]
    InvalidPort(String),
    #[error("Sink error: table name [{0}] is not a plain identifier")]
    InvalidTable(String),
    #[error("Sink error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Sink error: {0}")]
    Unavailable(String)
}
