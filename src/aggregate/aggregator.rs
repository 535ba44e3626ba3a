//! Folds event records into per-day score and frequency state.

use super::day::DayAggregate;
use crate::catalog::SeverityCatalog;
use crate::sources::EventRecord;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Mutable ingestion state. Days are kept in first-observed order.
pub struct Aggregator<'c> {
    catalog: &'c SeverityCatalog,
    days: Vec<DayAggregate>,
    index: HashMap<NaiveDate, usize>,
    recognized: u64,
    skipped: u64,
}

impl<'c> Aggregator<'c> {
    pub fn new(catalog: &'c SeverityCatalog) -> Self {
        Self {
            catalog,
            days: Vec::new(),
            index: HashMap::new(),
            recognized: 0,
            skipped: 0,
        }
    }

    /// Fold one record. Kinds absent from the catalog are skipped silently.
    /// Returns whether the record was recognized.
    pub fn ingest(&mut self, record: &EventRecord) -> bool {
        let Some(entry) = self.catalog.lookup(record.kind) else {
            self.skipped += 1;
            tracing::trace!(kind = record.kind, "unrecognized event kind skipped");
            return false;
        };
        let date = record.day();
        let slot = match self.index.get(&date) {
            Some(&i) => i,
            None => {
                self.days.push(DayAggregate::new(date));
                self.index.insert(date, self.days.len() - 1);
                self.days.len() - 1
            }
        };
        self.days[slot].add(record.kind, entry.weight);
        self.recognized += 1;
        tracing::debug!(
            kind = record.kind,
            ts = %record.timestamp,
            score = entry.weight,
            "event detected"
        );
        true
    }

    pub fn recognized(&self) -> u64 {
        self.recognized
    }

    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayAggregate> {
        self.index.get(&date).map(|&i| &self.days[i])
    }

    /// End of stream: hand off the day set, read-only from here on.
    pub fn finish(self) -> DayAggregates {
        DayAggregates { days: self.days }
    }
}

/// Finalized per-day state, in first-observed day order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayAggregates {
    days: Vec<DayAggregate>,
}

impl DayAggregates {
    pub fn iter(&self) -> impl Iterator<Item = &DayAggregate> {
        self.days.iter()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn as_slice(&self) -> &[DayAggregate] {
        &self.days
    }
}

impl<'a> IntoIterator for &'a DayAggregates {
    type Item = &'a DayAggregate;
    type IntoIter = std::slice::Iter<'a, DayAggregate>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}
