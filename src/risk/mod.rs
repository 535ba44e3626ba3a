//! Risk classification of per-day scores.

mod engine;

pub use engine::{RiskBand, RiskClassifier, ThresholdError};
