//! Maps a cumulative day score onto a named risk band using configurable thresholds.

use crate::config::RiskConfig;
use serde::{Deserialize, Serialize};

/// A named score range. `upper_bound` is inclusive; `None` means unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskBand {
    pub name: String,
    pub upper_bound: Option<u64>,
}

impl RiskBand {
    pub fn new(name: impl Into<String>, upper_bound: Option<u64>) -> Self {
        Self {
            name: name.into(),
            upper_bound,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThresholdError {
    #[error("risk band table is empty")]
    Empty,

    #[error("band `{name}` upper bound {bound} is not above the previous bound {previous}")]
    NotAscending {
        name: String,
        bound: u64,
        previous: u64,
    },

    #[error("band `{name}` is unbounded but is not the last band")]
    UnboundedNotLast { name: String },

    #[error("last band `{name}` must be unbounded")]
    LastBounded { name: String },
}

/// Ordered, validated band table. Lowest band first; the first band whose
/// upper bound is >= the score (or is unbounded) wins.
#[derive(Debug, Clone)]
pub struct RiskClassifier {
    bands: Vec<RiskBand>,
}

impl RiskClassifier {
    pub fn new(bands: Vec<RiskBand>) -> Result<Self, ThresholdError> {
        let last = bands.last().ok_or(ThresholdError::Empty)?;
        if last.upper_bound.is_some() {
            return Err(ThresholdError::LastBounded {
                name: last.name.clone(),
            });
        }
        let mut previous: Option<u64> = None;
        for band in &bands[..bands.len() - 1] {
            let Some(bound) = band.upper_bound else {
                return Err(ThresholdError::UnboundedNotLast {
                    name: band.name.clone(),
                });
            };
            if let Some(prev) = previous {
                if bound <= prev {
                    return Err(ThresholdError::NotAscending {
                        name: band.name.clone(),
                        bound,
                        previous: prev,
                    });
                }
            }
            previous = Some(bound);
        }
        Ok(Self { bands })
    }

    pub fn from_config(config: &RiskConfig) -> Result<Self, ThresholdError> {
        Self::new(config.bands.clone())
    }

    pub fn classify(&self, score: u64) -> &str {
        self.bands
            .iter()
            .find(|b| b.upper_bound.map_or(true, |ub| score <= ub))
            .or_else(|| self.bands.last())
            .map(|b| b.name.as_str())
            .unwrap_or_default()
    }

    pub fn bands(&self) -> &[RiskBand] {
        &self.bands
    }
}

impl Default for RiskClassifier {
    fn default() -> Self {
        Self {
            bands: RiskConfig::default().bands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries_are_exact() {
        let c = RiskClassifier::default();
        assert_eq!(c.classify(0), "zero");
        assert_eq!(c.classify(1), "low");
        assert_eq!(c.classify(50), "low");
        assert_eq!(c.classify(51), "medium");
        assert_eq!(c.classify(150), "medium");
        assert_eq!(c.classify(151), "high");
        assert_eq!(c.classify(u64::MAX), "high");
    }

    #[test]
    fn classify_is_pure() {
        let c = RiskClassifier::default();
        for score in [0, 7, 50, 51, 150, 151, 10_000] {
            assert_eq!(c.classify(score), c.classify(score));
        }
    }

    #[test]
    fn custom_table() {
        let c = RiskClassifier::new(vec![
            RiskBand::new("quiet", Some(10)),
            RiskBand::new("loud", None),
        ])
        .unwrap();
        assert_eq!(c.classify(0), "quiet");
        assert_eq!(c.classify(10), "quiet");
        assert_eq!(c.classify(11), "loud");
    }

    #[test]
    fn rejects_invalid_tables() {
        assert_eq!(RiskClassifier::new(vec![]).unwrap_err(), ThresholdError::Empty);
        assert!(matches!(
            RiskClassifier::new(vec![RiskBand::new("a", Some(5))]),
            Err(ThresholdError::LastBounded { .. })
        ));
        assert!(matches!(
            RiskClassifier::new(vec![
                RiskBand::new("a", None),
                RiskBand::new("b", None),
            ]),
            Err(ThresholdError::UnboundedNotLast { .. })
        ));
        assert!(matches!(
            RiskClassifier::new(vec![
                RiskBand::new("a", Some(10)),
                RiskBand::new("b", Some(10)),
                RiskBand::new("c", None),
            ]),
            Err(ThresholdError::NotAscending { bound: 10, previous: 10, .. })
        ));
    }
}
