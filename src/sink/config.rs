use std::fmt;
use std::fmt::{Debug, Formatter};

use crate::sink::errors::SinkError;

pub const DEFAULT_TABLE: &str = "portfolio_transactions";

/// Connection settings for the optional warehouse load.
///
/// Every field is optional; the sink only runs when all five are present and
/// non-empty. The caller builds this value, nothing here reads the environment.
#[derive(Clone, Default)]
pub struct SinkConfig {
    pub host: Option<String>,
    pub port: Option<String>,
    pub database: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub table: Option<String>
}

/// A complete, validated set of sink settings.
#[derive(Clone, PartialEq, Eq)]
pub struct SinkSettings {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub table: String
}

impl SinkConfig {
    /// Names of the settings that are absent or empty.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("host", &self.host),
            ("port", &self.port),
            ("database", &self.database),
            ("user", &self.user),
            ("password", &self.password)
        ]
        .into_iter()
        .filter(|(_, value)| present(value).is_none())
        .map(|(name, _)| name)
        .collect()
    }

    /// Resolves the configuration.
    ///
    /// Returns `Ok(None)` when any setting is missing, which disables the sink.
    ///
    /// # Errors
    /// Returns `SinkError` if every setting is present but the port or table name is unusable.
    pub fn settings(&self) -> Result<Option<SinkSettings>, SinkError> {
        let (Some(host), Some(port), Some(database), Some(user), Some(password)) = (
            present(&self.host),
            present(&self.port),
            present(&self.database),
            present(&self.user),
            present(&self.password)
        ) else {
            return Ok(None);
        };

        let port = port.trim().parse::<u16>()
            .map_err(|_| SinkError::InvalidPort(port.to_string()))?;

        let table = present(&self.table).unwrap_or(DEFAULT_TABLE);

        if !is_identifier(table) {
            return Err(SinkError::InvalidTable(table.to_string()));
        }

        Ok(Some(SinkSettings {
            host: host.to_string(),
            port,
            database: database.to_string(),
            user: user.to_string(),
            password: password.to_string(),
            table: table.to_string()
        }))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.trim().is_empty())
}

fn is_identifier(name: &str) -> bool {
    let mut characters = name.chars();

    matches!(characters.next(), Some(first) if first.is_ascii_alphabetic() || first == '_')
        && characters.all(|character| character.is_ascii_alphanumeric() || character == '_')
}

//NOTE: Hand-written so credentials never end up in logs
impl Debug for SinkConfig {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("SinkConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("table", &self.table)
            .finish()
    }
}

impl Debug for SinkSettings {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("SinkSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("table", &self.table)
            .finish()
    }
}
