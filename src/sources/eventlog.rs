//! Classic Windows event log reader (Security log by default).
//! Reads newest-first in sequential batches; event ids are masked to their low 16 bits.

use super::{EventRecord, LogSource, RecordStream, SourceError};
use chrono::{Local, TimeZone};
use std::collections::VecDeque;
use windows::core::{HSTRING, PCWSTR};
use windows::Win32::Foundation::{ERROR_HANDLE_EOF, ERROR_INSUFFICIENT_BUFFER};
use windows::Win32::System::EventLog::{
    CloseEventLog, OpenEventLogW, ReadEventLogW, EventLogHandle, EVENTLOGRECORD,
    EVENTLOG_BACKWARDS_READ, EVENTLOG_SEQUENTIAL_READ,
};

const INITIAL_BUFFER: usize = 64 * 1024;

pub struct WindowsEventLogSource {
    log_name: String,
}

impl WindowsEventLogSource {
    pub fn new(log_name: impl Into<String>) -> Self {
        Self {
            log_name: log_name.into(),
        }
    }
}

impl Default for WindowsEventLogSource {
    fn default() -> Self {
        Self::new("Security")
    }
}

impl LogSource for WindowsEventLogSource {
    fn name(&self) -> &str {
        &self.log_name
    }

    fn read(&mut self) -> Result<RecordStream<'_>, SourceError> {
        let wide = HSTRING::from(self.log_name.as_str());
        // SAFETY: both strings are valid for the duration of the call.
        let handle = unsafe { OpenEventLogW(PCWSTR::null(), &wide) }
            .map_err(|e| SourceError::unavailable(&self.log_name, e))?;
        tracing::info!(log = %self.log_name, "opened event log");
        Ok(Box::new(EventLogReader {
            name: self.log_name.clone(),
            handle: Some(handle),
            buffer: vec![0u8; INITIAL_BUFFER],
            pending: VecDeque::new(),
            records: 0,
        }))
    }
}

struct EventLogReader {
    name: String,
    handle: Option<EventLogHandle>,
    buffer: Vec<u8>,
    pending: VecDeque<EventRecord>,
    records: u64,
}

impl EventLogReader {
    /// Read the next batch into `pending`. Ok(false) at end of log.
    fn fill(&mut self, handle: EventLogHandle) -> Result<bool, windows::core::Error> {
        loop {
            let mut read = 0u32;
            let mut needed = 0u32;
            // SAFETY: buffer is writable for its full length.
            let res = unsafe {
                ReadEventLogW(
                    handle,
                    EVENTLOG_SEQUENTIAL_READ | EVENTLOG_BACKWARDS_READ,
                    0,
                    self.buffer.as_mut_ptr().cast(),
                    self.buffer.len() as u32,
                    &mut read,
                    &mut needed,
                )
            };
            match res {
                Ok(()) => {
                    self.decode(read as usize);
                    return Ok(true);
                }
                Err(e) if e.code() == ERROR_HANDLE_EOF.to_hresult() => return Ok(false),
                Err(e) if e.code() == ERROR_INSUFFICIENT_BUFFER.to_hresult() => {
                    self.buffer.resize(needed as usize, 0);
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn decode(&mut self, len: usize) {
        let header = std::mem::size_of::<EVENTLOGRECORD>();
        let mut offset = 0usize;
        while offset + header <= len {
            // SAFETY: offset + header is within the bytes written by ReadEventLogW;
            // records are DWORD-aligned within the buffer.
            let rec = unsafe {
                std::ptr::read_unaligned(self.buffer.as_ptr().add(offset) as *const EVENTLOGRECORD)
            };
            if rec.Length == 0 {
                break;
            }
            let kind = rec.EventID & 0xFFFF;
            match Local.timestamp_opt(i64::from(rec.TimeGenerated), 0).single() {
                Some(ts) => self.pending.push_back(EventRecord::new(kind, ts.fixed_offset())),
                None => tracing::trace!(kind, "event with unrepresentable timestamp skipped"),
            }
            offset += rec.Length as usize;
        }
    }

    fn close(&mut self) {
        if let Some(h) = self.handle.take() {
            // SAFETY: handle came from OpenEventLogW and is closed once.
            if let Err(e) = unsafe { CloseEventLog(h) } {
                tracing::warn!(log = %self.name, error = %e, "failed to close event log handle");
            }
        }
    }
}

impl Iterator for EventLogReader {
    type Item = Result<EventRecord, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(r) = self.pending.pop_front() {
                self.records += 1;
                return Some(Ok(r));
            }
            let handle = self.handle?;
            match self.fill(handle) {
                Ok(true) => continue,
                Ok(false) => {
                    tracing::info!(log = %self.name, "no more events found");
                    self.close();
                    return None;
                }
                Err(e) => {
                    self.close();
                    return Some(Err(SourceError::Read {
                        source_name: self.name.clone(),
                        records: self.records,
                        reason: e.to_string(),
                    }));
                }
            }
        }
    }
}

impl Drop for EventLogReader {
    fn drop(&mut self) {
        self.close();
    }
}
