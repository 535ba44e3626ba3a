//! Newline-delimited JSON event export: one `EventRecord` object per line.

use super::{EventRecord, LogSource, RecordStream, SourceError};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

pub struct NdjsonSource {
    path: PathBuf,
    name: String,
}

impl NdjsonSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSource for NdjsonSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&mut self) -> Result<RecordStream<'_>, SourceError> {
        let file = File::open(&self.path).map_err(|e| SourceError::unavailable(&self.name, e))?;
        tracing::debug!(path = %self.path.display(), "opened ndjson source");
        Ok(Box::new(NdjsonLines::new(self.name.clone(), BufReader::new(file))))
    }
}

/// Line-by-line decoder; stops after the first error.
pub(super) struct NdjsonLines<R> {
    source_name: String,
    lines: Lines<R>,
    line: u64,
    records: u64,
    done: bool,
}

impl<R: BufRead> NdjsonLines<R> {
    pub(super) fn new(source_name: String, reader: R) -> Self {
        Self {
            source_name,
            lines: reader.lines(),
            line: 0,
            records: 0,
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for NdjsonLines<R> {
    type Item = Result<EventRecord, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let text = match self.lines.next()? {
                Ok(t) => t,
                Err(e) => {
                    self.done = true;
                    return Some(Err(SourceError::Read {
                        source_name: self.source_name.clone(),
                        records: self.records,
                        reason: e.to_string(),
                    }));
                }
            };
            self.line += 1;
            let trimmed = text.trim();
            if trimmed.is_empty() {
                continue;
            }
            return match serde_json::from_str::<EventRecord>(trimmed) {
                Ok(record) => {
                    self.records += 1;
                    Some(Ok(record))
                }
                Err(e) => {
                    self.done = true;
                    Some(Err(SourceError::Parse {
                        source_name: self.source_name.clone(),
                        line: self.line,
                        reason: e.to_string(),
                    }))
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_records_and_skips_blank_lines() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, r#"{{"kind":1102,"timestamp":"2024-01-01T08:00:00Z"}}"#).unwrap();
        writeln!(f).unwrap();
        writeln!(f, r#"{{"kind":4670,"timestamp":"2024-01-02T08:00:00Z"}}"#).unwrap();
        let mut src = NdjsonSource::new(f.path());
        let out: Vec<_> = src.read().unwrap().collect::<Result<_, _>>().unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].kind, 1102);
        assert_eq!(out[1].kind, 4670);
    }

    #[test]
    fn malformed_line_ends_stream_with_parse_error() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, r#"{{"kind":1102,"timestamp":"2024-01-01T08:00:00Z"}}"#).unwrap();
        writeln!(f, "not json").unwrap();
        writeln!(f, r#"{{"kind":4670,"timestamp":"2024-01-02T08:00:00Z"}}"#).unwrap();
        let mut src = NdjsonSource::new(f.path());
        let out: Vec<_> = src.read().unwrap().collect();
        assert_eq!(out.len(), 2);
        assert!(out[0].is_ok());
        assert!(matches!(out[1], Err(SourceError::Parse { line: 2, .. })));
    }

    #[test]
    fn accepts_naive_and_date_only_timestamps() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, r#"{{"kind":1102,"timestamp":"2024-05-01 09:00:00"}}"#).unwrap();
        writeln!(f, r#"{{"kind":1102,"timestamp":"2024-05-01T09:00:00"}}"#).unwrap();
        writeln!(f, r#"{{"kind":1102,"timestamp":"2024-05-01"}}"#).unwrap();
        writeln!(f, r#"{{"kind":4670,"timestamp":"2024-05-02T08:00:00+02:00"}}"#).unwrap();
        let mut src = NdjsonSource::new(f.path());
        let out: Vec<EventRecord> = src.read().unwrap().collect::<Result<_, _>>().unwrap();
        assert_eq!(out.len(), 4);
        let may_1 = chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        for r in &out[..3] {
            assert_eq!(r.day(), may_1);
        }
        assert_eq!(out[0].timestamp.naive_local(), may_1.and_hms_opt(9, 0, 0).unwrap());
        assert_eq!(out[1].timestamp.naive_local(), may_1.and_hms_opt(9, 0, 0).unwrap());
        assert_eq!(out[2].timestamp.naive_local(), may_1.and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(out[3].timestamp.offset().local_minus_utc(), 2 * 3600);
    }

    #[test]
    fn unrecognized_timestamp_is_parse_error() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, r#"{{"kind":1102,"timestamp":"last tuesday"}}"#).unwrap();
        let mut src = NdjsonSource::new(f.path());
        let out: Vec<_> = src.read().unwrap().collect();
        assert!(matches!(out[0], Err(SourceError::Parse { line: 1, .. })));
    }

    #[test]
    fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let mut src = NdjsonSource::new(dir.path().join("absent.ndjson"));
        let err = src.read().err().unwrap();
        assert!(err.is_unavailable());
    }
}
