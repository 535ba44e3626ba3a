//! Turns finalized day aggregates into ordered daily report records.

use crate::aggregate::{DayAggregate, DayAggregates};
use crate::catalog::SeverityCatalog;
use crate::risk::RiskClassifier;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyReportRecord {
    pub date: NaiveDate,
    pub total_score: u64,
    pub risk_level: String,
    pub dominant_kind: u32,
    pub dominant_kind_description: String,
    pub dominant_kind_count: u64,
}

/// Report outcome handed to the presenter. `Days` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DailyReport {
    NoActivity,
    Days(Vec<DailyReportRecord>),
}

impl DailyReport {
    pub fn records(&self) -> &[DailyReportRecord] {
        match self {
            DailyReport::NoActivity => &[],
            DailyReport::Days(days) => days,
        }
    }

    pub fn is_no_activity(&self) -> bool {
        matches!(self, DailyReport::NoActivity)
    }
}

pub struct ReportBuilder<'a> {
    catalog: &'a SeverityCatalog,
    classifier: &'a RiskClassifier,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(catalog: &'a SeverityCatalog, classifier: &'a RiskClassifier) -> Self {
        Self {
            catalog,
            classifier,
        }
    }

    /// Pure: same aggregates, same report. Days keep their first-observed order.
    pub fn build(&self, days: &DayAggregates) -> DailyReport {
        let records: Vec<DailyReportRecord> =
            days.iter().filter_map(|day| self.record_for(day)).collect();
        if records.is_empty() {
            DailyReport::NoActivity
        } else {
            DailyReport::Days(records)
        }
    }

    fn record_for(&self, day: &DayAggregate) -> Option<DailyReportRecord> {
        let (kind, count) = day.event_counts.dominant()?;
        Some(DailyReportRecord {
            date: day.date,
            total_score: day.total_score,
            risk_level: self.classifier.classify(day.total_score).to_string(),
            dominant_kind: kind,
            dominant_kind_description: self.catalog.describe(kind).into_owned(),
            dominant_kind_count: count,
        })
    }
}
