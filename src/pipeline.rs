//! Single linear pass: log source → aggregator → report builder.

use crate::aggregate::Aggregator;
use crate::catalog::SeverityCatalog;
use crate::report::{DailyReport, ReportBuilder};
use crate::risk::RiskClassifier;
use crate::sources::{LogSource, SourceError};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, warn};

/// How the ingestion pass ended. Any partial aggregation is kept in every case.
#[derive(Debug)]
pub enum IngestOutcome {
    Completed,
    /// Stop flag raised before end of stream
    Interrupted,
    Failed(SourceError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    pub records_read: u64,
    pub recognized: u64,
    pub skipped: u64,
}

#[derive(Debug)]
pub struct Analysis {
    pub report: DailyReport,
    pub outcome: IngestOutcome,
    pub stats: IngestStats,
}

impl Analysis {
    /// The source could not even be constructed; nothing was read.
    pub fn source_unavailable(error: SourceError) -> Self {
        Self {
            report: DailyReport::NoActivity,
            outcome: IngestOutcome::Failed(error),
            stats: IngestStats::default(),
        }
    }

    /// Nothing was read because the source broke, as opposed to a quiet log.
    /// Both render the same report text.
    pub fn is_silent_failure(&self) -> bool {
        self.report.is_no_activity()
            && self.stats.records_read == 0
            && matches!(self.outcome, IngestOutcome::Failed(_))
    }
}

pub fn analyze(
    source: &mut dyn LogSource,
    catalog: &SeverityCatalog,
    classifier: &RiskClassifier,
    stop: &AtomicBool,
) -> Analysis {
    let name = source.name().to_string();
    info!(source = %name, "opening event log source");
    let mut aggregator = Aggregator::new(catalog);
    let mut records_read = 0u64;

    let outcome = match source.read() {
        Err(e) => IngestOutcome::Failed(e),
        Ok(stream) => {
            let mut outcome = IngestOutcome::Completed;
            for item in stream {
                if stop.load(Ordering::Relaxed) {
                    outcome = IngestOutcome::Interrupted;
                    break;
                }
                match item {
                    Ok(record) => {
                        records_read += 1;
                        aggregator.ingest(&record);
                    }
                    Err(e) => {
                        outcome = IngestOutcome::Failed(e);
                        break;
                    }
                }
            }
            outcome
        }
    };

    let stats = IngestStats {
        records_read,
        recognized: aggregator.recognized(),
        skipped: aggregator.skipped(),
    };
    match &outcome {
        IngestOutcome::Completed => info!(source = %name, ?stats, "event log fully read"),
        IngestOutcome::Interrupted => {
            warn!(source = %name, ?stats, "ingestion interrupted; reporting partial results")
        }
        IngestOutcome::Failed(e) => {
            error!(source = %name, error = %e, ?stats, "event log read failed; reporting partial results")
        }
    }

    let days = aggregator.finish();
    let report = ReportBuilder::new(catalog, classifier).build(&days);
    Analysis {
        report,
        outcome,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{EventRecord, MemorySource};
    use chrono::DateTime;

    fn rec(kind: u32, ts: &str) -> EventRecord {
        EventRecord::new(kind, DateTime::parse_from_rfc3339(ts).unwrap())
    }

    fn run(mut src: MemorySource) -> Analysis {
        let catalog = SeverityCatalog::default();
        let classifier = RiskClassifier::default();
        analyze(&mut src, &catalog, &classifier, &AtomicBool::new(false))
    }

    #[test]
    fn empty_stream_is_quiet_no_activity() {
        let a = run(MemorySource::default());
        assert!(a.report.is_no_activity());
        assert!(matches!(a.outcome, IngestOutcome::Completed));
        assert!(!a.is_silent_failure());
    }

    #[test]
    fn only_unknown_kinds_is_no_activity() {
        let a = run(MemorySource::from_records(vec![rec(9999, "2024-01-01T00:00:00Z")]));
        assert!(a.report.is_no_activity());
        assert_eq!(a.stats.records_read, 1);
        assert_eq!(a.stats.skipped, 1);
    }

    #[test]
    fn open_failure_is_silent_failure() {
        let a = run(MemorySource::default().fail_open("access denied"));
        assert!(a.report.is_no_activity());
        assert!(a.is_silent_failure());
        match a.outcome {
            IngestOutcome::Failed(e) => assert!(e.is_unavailable()),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn unconstructible_source_reports_silent_failure() {
        let a = Analysis::source_unavailable(SourceError::unavailable("Security", "unsupported"));
        assert!(a.is_silent_failure());
        assert_eq!(a.stats, IngestStats::default());
    }

    #[test]
    fn mid_stream_failure_keeps_partial_report() {
        let src = MemorySource::from_records(vec![
            rec(1102, "2024-01-01T00:00:00Z"),
            rec(4670, "2024-01-02T00:00:00Z"),
        ])
        .fail_after_records("handle closed");
        let a = run(src);
        assert_eq!(a.report.records().len(), 2);
        assert!(matches!(a.outcome, IngestOutcome::Failed(SourceError::Read { .. })));
        assert!(!a.is_silent_failure());
    }

    #[test]
    fn stop_flag_interrupts() {
        let catalog = SeverityCatalog::default();
        let classifier = RiskClassifier::default();
        let mut src = MemorySource::from_records(vec![rec(1102, "2024-01-01T00:00:00Z")]);
        let a = analyze(&mut src, &catalog, &classifier, &AtomicBool::new(true));
        assert!(matches!(a.outcome, IngestOutcome::Interrupted));
        assert!(a.report.is_no_activity());
        assert_eq!(a.stats.records_read, 0);
    }
}
