//! In-process record queue. Fed by an embedding host or test fixture via `record`.

use super::{EventRecord, LogSource, RecordStream, SourceError};
use std::collections::VecDeque;
use std::sync::Mutex;

pub struct MemorySource {
    name: String,
    queue: Mutex<VecDeque<EventRecord>>,
    /// Simulated open failure
    unavailable: Option<String>,
    /// Simulated mid-stream failure after the queued records
    trailing_error: Option<String>,
}

impl Default for MemorySource {
    fn default() -> Self {
        Self::new("memory")
    }
}

impl MemorySource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            queue: Mutex::new(VecDeque::new()),
            unavailable: None,
            trailing_error: None,
        }
    }

    pub fn from_records(records: impl IntoIterator<Item = EventRecord>) -> Self {
        let src = Self::default();
        for r in records {
            src.record(r);
        }
        src
    }

    /// Queue a record for the next read
    pub fn record(&self, r: EventRecord) {
        if let Ok(mut q) = self.queue.lock() {
            q.push_back(r);
        }
    }

    pub fn len(&self) -> usize {
        self.queue.lock().map(|q| q.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make `read` fail as if the source could not be opened.
    pub fn fail_open(mut self, reason: impl Into<String>) -> Self {
        self.unavailable = Some(reason.into());
        self
    }

    /// Yield a read error once the queued records are exhausted.
    pub fn fail_after_records(mut self, reason: impl Into<String>) -> Self {
        self.trailing_error = Some(reason.into());
        self
    }
}

impl LogSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&mut self) -> Result<RecordStream<'_>, SourceError> {
        if let Some(reason) = &self.unavailable {
            return Err(SourceError::unavailable(&self.name, reason));
        }
        let queue = self.queue.get_mut().map_err(|_| {
            SourceError::unavailable(&self.name, "record queue poisoned")
        })?;
        let records: Vec<EventRecord> = queue.drain(..).collect();
        let count = records.len() as u64;
        let trailing = self.trailing_error.take().map(|reason| {
            Err(SourceError::Read {
                source_name: self.name.clone(),
                records: count,
                reason,
            })
        });
        Ok(Box::new(records.into_iter().map(Ok).chain(trailing)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn rec(kind: u32) -> EventRecord {
        EventRecord::new(kind, DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap())
    }

    #[test]
    fn drains_queue_once() {
        let mut src = MemorySource::from_records(vec![rec(1), rec(2)]);
        assert_eq!(src.len(), 2);
        assert_eq!(src.read().unwrap().count(), 2);
        assert!(src.is_empty());
        assert_eq!(src.read().unwrap().count(), 0);
    }

    #[test]
    fn trailing_error_follows_records() {
        let mut src = MemorySource::from_records(vec![rec(1)]).fail_after_records("access denied");
        let out: Vec<_> = src.read().unwrap().collect();
        assert_eq!(out.len(), 2);
        assert!(matches!(out[1], Err(SourceError::Read { records: 1, .. })));
    }

    #[test]
    fn open_failure() {
        let mut src = MemorySource::default().fail_open("access denied");
        assert!(src.read().err().unwrap().is_unavailable());
    }
}
