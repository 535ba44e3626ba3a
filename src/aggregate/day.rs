//! Per-day running state with explicit first-seen ordering of event kinds.

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Occurrence counts per kind, iterated in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindCounts {
    order: Vec<(u32, u64)>,
    index: HashMap<u32, usize>,
}

impl KindCounts {
    pub fn increment(&mut self, kind: u32) {
        match self.index.get(&kind) {
            Some(&i) => self.order[i].1 += 1,
            None => {
                self.index.insert(kind, self.order.len());
                self.order.push((kind, 1));
            }
        }
    }

    pub fn get(&self, kind: u32) -> u64 {
        self.index.get(&kind).map(|&i| self.order[i].1).unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Kind with the highest count; among equal maxima the first seen wins.
    pub fn dominant(&self) -> Option<(u32, u64)> {
        let mut best: Option<(u32, u64)> = None;
        for (kind, count) in self.iter() {
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((kind, count));
            }
        }
        best
    }
}

impl Serialize for KindCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.order.iter().map(|(k, c)| (k.to_string(), c)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayAggregate {
    pub date: NaiveDate,
    pub total_score: u64,
    pub event_counts: KindCounts,
}

impl DayAggregate {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            total_score: 0,
            event_counts: KindCounts::default(),
        }
    }

    pub(crate) fn add(&mut self, kind: u32, weight: u32) {
        self.total_score += u64::from(weight);
        self.event_counts.increment(kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tie_resolves_to_first_seen() {
        let mut c = KindCounts::default();
        c.increment(4670);
        c.increment(4720);
        c.increment(4720);
        c.increment(4670);
        assert_eq!(c.dominant(), Some((4670, 2)));
    }

    #[test]
    fn strict_maximum_wins_regardless_of_order() {
        let mut c = KindCounts::default();
        c.increment(1);
        c.increment(2);
        c.increment(2);
        assert_eq!(c.dominant(), Some((2, 2)));
        assert_eq!(c.get(1), 1);
        assert_eq!(c.get(3), 0);
    }

    #[test]
    fn empty_has_no_dominant() {
        assert_eq!(KindCounts::default().dominant(), None);
    }

    #[test]
    fn iteration_keeps_insertion_order() {
        let mut c = KindCounts::default();
        for k in [30, 10, 20, 10] {
            c.increment(k);
        }
        let kinds: Vec<u32> = c.iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec![30, 10, 20]);
    }
}
