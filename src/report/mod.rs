//! Daily risk report: building records from aggregates and presenting them.

mod builder;
mod presenter;

pub use builder::{DailyReport, DailyReportRecord, ReportBuilder};
pub use presenter::{Presenter, NO_ACTIVITY_TEXT};
