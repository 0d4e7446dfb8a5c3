//! The clarity index: a weighted 0–100 aggregate over the five index
//! dimensions. The gate-only dimension never contributes — its weight is 0
//! by construction and validated at config load.

use serde::Serialize;
use std::fmt;
use tracing::debug;

use clarity_core::config::{ScoringThresholds, VariantConfig};
use clarity_core::types::Dimension;

use crate::scoring::DimensionScoreSet;

/// Tier label for a computed index value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexTier {
    /// Below the NO_GO threshold.
    Low,
    /// Between the thresholds — clarification territory.
    Moderate,
    /// At or above the GO threshold.
    High,
}

impl IndexTier {
    /// Bucket a value against the two fixed thresholds.
    pub fn from_value(value: f64, thresholds: &ScoringThresholds) -> Self {
        if value < thresholds.effective_index_low() {
            Self::Low
        } else if value < thresholds.effective_index_high() {
            Self::Moderate
        } else {
            Self::High
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

impl fmt::Display for IndexTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One dimension's contribution to the index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexContribution {
    pub dimension: Dimension,
    pub weight: f64,
    pub score: Option<f64>,
    /// `weight * score`, or `None` when the dimension has no data.
    pub contribution: Option<f64>,
}

/// The computed clarity index with its per-dimension breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClarityIndex {
    pub value: Option<f64>,
    /// False for gate-only variants that skip index computation entirely.
    pub computed: bool,
    pub tier: Option<IndexTier>,
    pub breakdown: Vec<IndexContribution>,
}

impl ClarityIndex {
    /// The not-applicable index for gate-only variants.
    pub fn not_computed() -> Self {
        Self {
            value: None,
            computed: false,
            tier: None,
            breakdown: Vec::new(),
        }
    }
}

/// Compute the index from case-level dimension scores.
///
/// `value = Σ(weight_i × score_i)` over the index dimensions with a
/// non-null score; all-null yields `None` (insufficient data, not 0).
pub fn compute_index(
    case: &DimensionScoreSet,
    variant: &VariantConfig,
    thresholds: &ScoringThresholds,
) -> ClarityIndex {
    if !variant.computes_index {
        return ClarityIndex::not_computed();
    }

    let mut breakdown = Vec::with_capacity(Dimension::INDEX.len());
    let mut value = None;
    for dimension in Dimension::INDEX {
        let weight = variant.index_weight(dimension);
        let score = case.get(dimension);
        let contribution = score.map(|s| weight * s);
        if let Some(c) = contribution {
            value = Some(value.unwrap_or(0.0) + c);
        }
        breakdown.push(IndexContribution {
            dimension,
            weight,
            score,
            contribution,
        });
    }

    let tier = value.map(|v| IndexTier::from_value(v, thresholds));
    debug!(variant = %variant.name, value = ?value, tier = ?tier, "clarity index computed");
    ClarityIndex {
        value,
        computed: true,
        tier,
        breakdown,
    }
}
