//! Log sources: produce the raw event record stream consumed by the aggregator.
//! File, directory, in-memory and (on Windows) the Security event log.

mod directory;
mod memory;
mod ndjson;
pub mod timestamp;
#[cfg(windows)]
mod eventlog;

pub use directory::DirectorySource;
pub use memory::MemorySource;
pub use ndjson::NdjsonSource;
#[cfg(windows)]
pub use eventlog::WindowsEventLogSource;

use crate::config::SourceConfig;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// One occurrence of a security-relevant event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(alias = "event_id")]
    pub kind: u32,
    #[serde(alias = "time_generated", deserialize_with = "timestamp::deserialize")]
    pub timestamp: DateTime<FixedOffset>,
}

impl EventRecord {
    pub fn new(kind: u32, timestamp: DateTime<FixedOffset>) -> Self {
        Self { kind, timestamp }
    }

    /// Calendar day in the record's own offset.
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("log source {source_name} unavailable: {reason}")]
    Unavailable { source_name: String, reason: String },

    #[error("read from {source_name} failed after {records} records: {reason}")]
    Read {
        source_name: String,
        records: u64,
        reason: String,
    },

    #[error("malformed record in {source_name} at line {line}: {reason}")]
    Parse {
        source_name: String,
        line: u64,
        reason: String,
    },
}

impl SourceError {
    pub fn unavailable(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::Unavailable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    /// True when the source failed before producing anything.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

pub type RecordStream<'a> = Box<dyn Iterator<Item = Result<EventRecord, SourceError>> + 'a>;

/// A finite, consume-once stream of event records.
///
/// `read` opens the underlying source; failing to open is `SourceError::Unavailable`.
/// A stream yields at most one error, after which it ends.
pub trait LogSource {
    fn name(&self) -> &str;
    fn read(&mut self) -> Result<RecordStream<'_>, SourceError>;
}

/// Build the source described by the configuration.
pub fn from_config(config: &SourceConfig) -> Result<Box<dyn LogSource>, SourceError> {
    match config {
        SourceConfig::Ndjson { path } => Ok(Box::new(NdjsonSource::new(path.clone()))),
        SourceConfig::Directory { path } => Ok(Box::new(DirectorySource::new(path.clone()))),
        #[cfg(windows)]
        SourceConfig::WindowsEventLog { log_name } => {
            Ok(Box::new(WindowsEventLogSource::new(log_name.clone())))
        }
        #[cfg(not(windows))]
        SourceConfig::WindowsEventLog { log_name } => Err(SourceError::unavailable(
            log_name.as_str(),
            "Windows event log is not available on this platform",
        )),
    }
}
