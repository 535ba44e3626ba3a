//! Diagnostic log setup (JSON lines or plain text) and one-shot JSON emission.

use crate::config::LogConfig;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::Mutex;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub struct StructuredLogger;

impl StructuredLogger {
    /// Install the global subscriber. Level from RUST_LOG, else the configured one.
    /// Logs go to the configured file (appended) or to stderr so they never mix with the report.
    pub fn init(config: &LogConfig) -> io::Result<()> {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
        let registry = tracing_subscriber::registry().with(filter);

        match &config.file {
            Some(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                let writer = Mutex::new(file);
                if config.json {
                    registry
                        .with(
                            tracing_subscriber::fmt::layer()
                                .json()
                                .with_span_events(FmtSpan::NONE)
                                .with_writer(writer),
                        )
                        .init();
                } else {
                    registry
                        .with(
                            tracing_subscriber::fmt::layer()
                                .with_ansi(false)
                                .with_writer(writer),
                        )
                        .init();
                }
            }
            None => {
                if config.json {
                    registry
                        .with(
                            tracing_subscriber::fmt::layer()
                                .json()
                                .with_span_events(FmtSpan::NONE)
                                .with_writer(io::stderr),
                        )
                        .init();
                } else {
                    registry
                        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
                        .init();
                }
            }
        }
        Ok(())
    }

    /// Write a single JSON document followed by a newline, bypassing tracing.
    pub fn emit_json(value: &impl Serialize, w: &mut impl Write) -> io::Result<()> {
        let line = serde_json::to_string(value)?;
        writeln!(w, "{}", line)
    }
}
