//! Directory of exported ndjson logs, streamed file by file in name order.

use super::ndjson::NdjsonLines;
use super::{LogSource, RecordStream, SourceError};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const MAX_DEPTH: usize = 4;
const EXTENSIONS: [&str; 2] = ["ndjson", "jsonl"];

pub struct DirectorySource {
    root: PathBuf,
    name: String,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let name = root.display().to_string();
        Self { root, name }
    }

    fn is_log_file(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| EXTENSIONS.contains(&e))
            .unwrap_or(false)
    }

    fn files(&self) -> Result<Vec<PathBuf>, SourceError> {
        if !self.root.is_dir() {
            return Err(SourceError::unavailable(&self.name, "not a directory"));
        }
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root)
            .max_depth(MAX_DEPTH)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| SourceError::unavailable(&self.name, e))?;
            if entry.file_type().is_file() && Self::is_log_file(entry.path()) {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}

impl LogSource for DirectorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&mut self) -> Result<RecordStream<'_>, SourceError> {
        let files = self.files()?;
        tracing::debug!(root = %self.root.display(), files = files.len(), "scanning log directory");
        let stream = files.into_iter().flat_map(|path| -> RecordStream<'static> {
            let name = path.display().to_string();
            match File::open(&path) {
                Ok(f) => Box::new(NdjsonLines::new(name, BufReader::new(f))),
                Err(e) => Box::new(std::iter::once(Err(SourceError::Read {
                    source_name: name,
                    records: 0,
                    reason: e.to_string(),
                }))),
            }
        });
        Ok(Box::new(StopAfterError::new(stream)))
    }
}

/// Ends the stream after the first error so one bad file does not hide the failure.
struct StopAfterError<I> {
    inner: I,
    done: bool,
}

impl<I> StopAfterError<I> {
    fn new(inner: I) -> Self {
        Self { inner, done: false }
    }
}

impl<T, I: Iterator<Item = Result<T, SourceError>>> Iterator for StopAfterError<I> {
    type Item = Result<T, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.inner.next()?;
        if item.is_err() {
            self.done = true;
        }
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write(path: &Path, lines: &[&str]) {
        let mut f = File::create(path).unwrap();
        for l in lines {
            writeln!(f, "{}", l).unwrap();
        }
    }

    #[test]
    fn streams_matching_files_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        write(
            &dir.path().join("b.ndjson"),
            &[r#"{"kind":2,"timestamp":"2024-01-01T00:00:00Z"}"#],
        );
        write(
            &dir.path().join("a.jsonl"),
            &[r#"{"kind":1,"timestamp":"2024-01-01T00:00:00Z"}"#],
        );
        write(&dir.path().join("notes.txt"), &["ignored"]);
        let mut src = DirectorySource::new(dir.path());
        let kinds: Vec<u32> = src
            .read()
            .unwrap()
            .map(|r| r.unwrap().kind)
            .collect();
        assert_eq!(kinds, vec![1, 2]);
    }

    #[test]
    fn stops_after_first_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("a.ndjson"), &["{broken"]);
        write(
            &dir.path().join("b.ndjson"),
            &[r#"{"kind":2,"timestamp":"2024-01-01T00:00:00Z"}"#],
        );
        let mut src = DirectorySource::new(dir.path());
        let out: Vec<_> = src.read().unwrap().collect();
        assert_eq!(out.len(), 1);
        assert!(out[0].is_err());
    }

    #[test]
    fn missing_directory_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let mut src = DirectorySource::new(dir.path().join("nope"));
        assert!(src.read().err().unwrap().is_unavailable());
    }
}
