//! Security event log analyzer: per-day risk scoring and daily risk report.
//!
//! Modular structure:
//! - [`sources`] — Event record streams (ndjson export, directory, memory, Windows event log)
//! - [`catalog`] — Severity weights and descriptions per event kind
//! - [`aggregate`] — Per-day score and frequency accumulation
//! - [`risk`] — Score → risk level bands
//! - [`report`] — Daily report records and presentation
//! - [`pipeline`] — Single-pass analysis wiring it together
//! - [`logging`] — Structured diagnostic logging

pub mod config;
pub mod sources;
pub mod catalog;
pub mod aggregate;
pub mod risk;
pub mod report;
pub mod pipeline;
pub mod logging;

pub use config::AnalyzerConfig;
pub use sources::{EventRecord, LogSource, SourceError};
pub use catalog::{SeverityCatalog, SeverityEntry};
pub use aggregate::{Aggregator, DayAggregate, DayAggregates};
pub use risk::RiskClassifier;
pub use report::{DailyReport, DailyReportRecord, Presenter, ReportBuilder};
pub use pipeline::{analyze, Analysis, IngestOutcome};
pub use logging::StructuredLogger;
