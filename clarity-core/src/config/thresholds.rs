//! Scoring thresholds.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Threshold configuration for gates and the recommendation rule.
///
/// All values are optional in TOML; `effective_*` accessors supply the
/// compiled defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScoringThresholds {
    /// Gate floor for dimension scores (0–100). Default: 50.
    pub dimension_floor: Option<f64>,
    /// Index value below which the verdict is NO_GO. Default: 55.
    pub index_low: Option<f64>,
    /// Index value at or above which the verdict can be GO. Default: 75.
    pub index_high: Option<f64>,
    /// Cross-role mismatch gap on the adjusted 1–5 scale. Default: 1.5.
    pub cross_role_gap: Option<f64>,
    /// Score at or above which a gate probe counts as "high" (0–100). Default: 75.
    pub probe_high: Option<f64>,
}

impl ScoringThresholds {
    pub fn effective_dimension_floor(&self) -> f64 {
        self.dimension_floor.unwrap_or(50.0)
    }

    pub fn effective_index_low(&self) -> f64 {
        self.index_low.unwrap_or(55.0)
    }

    pub fn effective_index_high(&self) -> f64 {
        self.index_high.unwrap_or(75.0)
    }

    pub fn effective_cross_role_gap(&self) -> f64 {
        self.cross_role_gap.unwrap_or(1.5)
    }

    pub fn effective_probe_high(&self) -> f64 {
        self.probe_high.unwrap_or(75.0)
    }

    /// Reject thresholds outside their domain or in the wrong order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("dimension_floor", self.effective_dimension_floor(), 0.0, 100.0),
            ("index_low", self.effective_index_low(), 0.0, 100.0),
            ("index_high", self.effective_index_high(), 0.0, 100.0),
            ("cross_role_gap", self.effective_cross_role_gap(), 0.0, 4.0),
            ("probe_high", self.effective_probe_high(), 0.0, 100.0),
        ];
        for (name, value, lo, hi) in checks {
            if !value.is_finite() || value < lo || value > hi {
                return Err(ConfigError::InvalidThreshold {
                    name: name.to_string(),
                    value,
                });
            }
        }
        if self.effective_index_low() > self.effective_index_high() {
            return Err(ConfigError::InvalidThreshold {
                name: "index_low".to_string(),
                value: self.effective_index_low(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_effective_when_unset() {
        let t = ScoringThresholds::default();
        assert_eq!(t.effective_dimension_floor(), 50.0);
        assert_eq!(t.effective_index_low(), 55.0);
        assert_eq!(t.effective_index_high(), 75.0);
        assert_eq!(t.effective_cross_role_gap(), 1.5);
        assert_eq!(t.effective_probe_high(), 75.0);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn inverted_band_is_rejected() {
        let t = ScoringThresholds {
            index_low: Some(80.0),
            index_high: Some(60.0),
            ..Default::default()
        };
        assert!(t.validate().is_err());
    }

    #[test]
    fn out_of_domain_threshold_is_rejected() {
        let t = ScoringThresholds {
            dimension_floor: Some(140.0),
            ..Default::default()
        };
        assert!(t.validate().is_err());
    }
}
