//! Severity catalog: static event kind → (weight, description) table.
//! Built once at startup and shared by reference; unknown kinds are simply absent.

mod defaults;

pub use defaults::windows_security_entries;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;

/// One recognized event kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityEntry {
    pub kind: u32,
    pub weight: u32,
    /// Human description; empty means "not described"
    #[serde(default)]
    pub description: String,
}

impl SeverityEntry {
    pub fn new(kind: u32, weight: u32, description: impl Into<String>) -> Self {
        Self {
            kind,
            weight,
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SeverityCatalog {
    entries: HashMap<u32, SeverityEntry>,
}

impl SeverityCatalog {
    /// Later entries for the same kind replace earlier ones.
    pub fn new(entries: impl IntoIterator<Item = SeverityEntry>) -> Self {
        let entries = entries.into_iter().map(|e| (e.kind, e)).collect();
        Self { entries }
    }

    pub fn lookup(&self, kind: u32) -> Option<&SeverityEntry> {
        self.entries.get(&kind)
    }

    pub fn weight(&self, kind: u32) -> Option<u32> {
        self.lookup(kind).map(|e| e.weight)
    }

    /// Description for a kind, or the fallback text when none is recorded.
    pub fn describe(&self, kind: u32) -> Cow<'_, str> {
        match self.lookup(kind) {
            Some(e) if !e.description.is_empty() => Cow::Borrowed(e.description.as_str()),
            _ => Cow::Owned(format!("No description available for ID {}", kind)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SeverityCatalog {
    fn default() -> Self {
        Self::new(windows_security_entries())
    }
}
