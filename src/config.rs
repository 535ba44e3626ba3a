//! Analyzer configuration: severity table, risk bands, log source, report output, logging.

use crate::catalog::{windows_security_entries, SeverityCatalog, SeverityEntry};
use crate::risk::{RiskBand, RiskClassifier, ThresholdError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid risk thresholds: {0}")]
    Thresholds(#[from] ThresholdError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Severity weights and descriptions per event kind
    pub catalog: Vec<SeverityEntry>,
    /// Risk bands, lowest first
    pub risk: RiskConfig,
    /// Where event records come from
    pub source: SourceConfig,
    /// Report rendering
    pub report: ReportConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub bands: Vec<RiskBand>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceConfig {
    /// Single newline-delimited JSON export
    Ndjson { path: PathBuf },
    /// Directory tree of `.ndjson`/`.jsonl` exports
    Directory { path: PathBuf },
    /// Classic Windows event log (Windows only)
    WindowsEventLog { log_name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub format: ReportFormat,
    /// Report file; stdout when unset
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
    /// Diagnostic log file (appended); stderr when unset
    pub file: Option<PathBuf>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            catalog: windows_security_entries(),
            risk: RiskConfig::default(),
            source: SourceConfig::default(),
            report: ReportConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            bands: vec![
                RiskBand::new("zero", Some(0)),
                RiskBand::new("low", Some(50)),
                RiskBand::new("medium", Some(150)),
                RiskBand::new("high", None),
            ],
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        if cfg!(windows) {
            SourceConfig::WindowsEventLog {
                log_name: "Security".to_string(),
            }
        } else {
            SourceConfig::Ndjson {
                path: PathBuf::from("security_events.ndjson"),
            }
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Text,
            output: None,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: Some(PathBuf::from("security_event_log_analyzer.log")),
        }
    }
}

impl AnalyzerConfig {
    /// Load from JSON file; a missing file yields defaults. Risk bands are validated.
    pub fn try_load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.classifier()?;
        Ok(config)
    }

    /// Load from JSON file if present and valid; otherwise return default
    pub fn load(path: &Path) -> Self {
        Self::try_load(path).unwrap_or_default()
    }

    pub fn catalog(&self) -> SeverityCatalog {
        SeverityCatalog::new(self.catalog.iter().cloned())
    }

    pub fn classifier(&self) -> Result<RiskClassifier, ConfigError> {
        Ok(RiskClassifier::from_config(&self.risk)?)
    }

    /// Replace the configured source with a file or directory path.
    pub fn override_source_path(&mut self, path: PathBuf) {
        self.source = if path.is_dir() {
            SourceConfig::Directory { path }
        } else {
            SourceConfig::Ndjson { path }
        };
    }
}
