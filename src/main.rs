//! Analyzer entrypoint: read the configured event log once, print the daily risk report.
//! Usage: `seclog-risk [PATH]` where PATH overrides the configured ndjson file or directory.

use seclog_risk::{
    analyze,
    Analysis,
    config::AnalyzerConfig,
    logging::StructuredLogger,
    pipeline::IngestOutcome,
    report::Presenter,
    sources,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, warn};

static STOP: AtomicBool = AtomicBool::new(false);

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_path = std::env::var("SECLOG_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.json"));
    let loaded = AnalyzerConfig::try_load(&config_path);
    let mut config = match &loaded {
        Ok(c) => c.clone(),
        Err(_) => AnalyzerConfig::default(),
    };
    if let Some(path) = std::env::args_os().nth(1) {
        config.override_source_path(PathBuf::from(path));
    }

    StructuredLogger::init(&config.log)?;
    if let Err(e) = &loaded {
        warn!(error = %e, "config unusable; using defaults");
    }
    info!(config = %config_path.display(), source = ?config.source, "security event log analyzer starting");

    let catalog = config.catalog();
    let classifier = config.classifier()?;

    let _ = ctrlc::set_handler(|| {
        STOP.store(true, Ordering::Relaxed);
    });

    let analysis = match sources::from_config(&config.source) {
        Ok(mut source) => {
            println!("{}", Presenter::opening_line(source.name()));
            analyze(source.as_mut(), &catalog, &classifier, &STOP)
        }
        Err(e) => {
            error!(error = %e, "event log source unavailable");
            Analysis::source_unavailable(e)
        }
    };
    if analysis.is_silent_failure() {
        warn!("no events were read because the source failed; the report below reflects no data");
    }
    if let IngestOutcome::Failed(e) = &analysis.outcome {
        eprintln!("warning: {}", e);
    }

    Presenter::log(&analysis.report);
    let presenter = Presenter::new(config.report.format);
    match &config.report.output {
        Some(path) => {
            let mut w = BufWriter::new(File::create(path)?);
            presenter.write(&analysis.report, &mut w)?;
            w.flush()?;
            info!(path = %path.display(), "report written");
        }
        None => {
            let stdout = std::io::stdout();
            presenter.write(&analysis.report, &mut stdout.lock())?;
        }
    }

    info!(stats = ?analysis.stats, "analysis complete");
    Ok(())
}
