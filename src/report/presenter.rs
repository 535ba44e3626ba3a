//! Renders a daily report as console text or a JSON document.

use super::builder::{DailyReport, DailyReportRecord};
use crate::config::ReportFormat;
use crate::logging::StructuredLogger;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::{self, Write};
use tracing::info;
use uuid::Uuid;

pub const NO_ACTIVITY_TEXT: &str = "No unusual activities detected.";

#[derive(Serialize)]
struct ReportDocument<'a> {
    run_id: Uuid,
    generated_at: DateTime<Utc>,
    status: &'static str,
    days: &'a [DailyReportRecord],
}

pub struct Presenter {
    format: ReportFormat,
}

impl Presenter {
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    pub fn write(&self, report: &DailyReport, w: &mut impl Write) -> io::Result<()> {
        match self.format {
            ReportFormat::Text => Self::write_text(report, w),
            ReportFormat::Json => Self::write_json(report, w),
        }
    }

    /// Console line printed before the source is read.
    pub fn opening_line(source_name: &str) -> String {
        format!("Opening {} event log...", source_name)
    }

    fn write_text(report: &DailyReport, w: &mut impl Write) -> io::Result<()> {
        match report {
            // header keeps its trailing space here
            DailyReport::NoActivity => write!(w, "\nDaily Security Report: \n{}\n", NO_ACTIVITY_TEXT)?,
            DailyReport::Days(days) => {
                writeln!(w, "\nDaily Security Report:")?;
                for d in days {
                    writeln!(
                        w,
                        "Date: {}, Total Score: {}, Risk Level: {}",
                        d.date, d.total_score, d.risk_level
                    )?;
                    writeln!(
                        w,
                        "   Most Frequent Event: ID {} ({}) (Occurred {} times)",
                        d.dominant_kind, d.dominant_kind_description, d.dominant_kind_count
                    )?;
                }
            }
        }
        Ok(())
    }

    fn write_json(report: &DailyReport, w: &mut impl Write) -> io::Result<()> {
        let doc = ReportDocument {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            status: if report.is_no_activity() {
                "no_activity"
            } else {
                "activity"
            },
            days: report.records(),
        };
        StructuredLogger::emit_json(&doc, w)
    }

    /// Mirror the report into the diagnostic log, one line per day.
    pub fn log(report: &DailyReport) {
        match report {
            DailyReport::NoActivity => info!("no events found; no unusual activities detected"),
            DailyReport::Days(days) => {
                info!(days = days.len(), "generating daily security report");
                for d in days {
                    info!(
                        date = %d.date,
                        total_score = d.total_score,
                        risk_level = %d.risk_level,
                        dominant_kind = d.dominant_kind,
                        description = %d.dominant_kind_description,
                        count = d.dominant_kind_count,
                        "daily report"
                    );
                }
            }
        }
    }
}
