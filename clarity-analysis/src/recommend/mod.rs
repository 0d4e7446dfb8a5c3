//! Recommendation engine — one decision per evaluation, strict precedence.
//!
//! A pure, total function of (index, flags, gates, variant). Narrative text
//! generated downstream may reference this result but can never influence
//! it; nothing probabilistic enters the branch selection.

use serde::Serialize;
use std::fmt;
use tracing::debug;

use clarity_core::config::{ScoringThresholds, VariantConfig};
use clarity_core::types::Severity;

use crate::flags::types::Flag;
use crate::gates::GateOutcome;
use crate::index::ClarityIndex;

/// Final verdict values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Go,
    Clarify,
    NoGo,
}

impl Verdict {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Go => "GO",
            Self::Clarify => "CLARIFY",
            Self::NoGo => "NO_GO",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which precedence rule decided the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrimaryFactor {
    /// Gate-only variant: no index, no verdict.
    NotApplicable,
    /// A critical contradiction flag forced NO_GO.
    CriticalFlag,
    /// The index fell below the low threshold.
    IndexBelowFloor,
    /// The index could not be computed from the answers present.
    InsufficientData,
    /// One or more gates forced CLARIFY.
    GateFired,
    /// The index landed in the clarification band.
    IndexMidBand,
    /// The index cleared the high threshold with nothing against it.
    IndexClear,
}

/// The terminal output of one evaluation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// `None` for gate-only variants (not applicable).
    pub verdict: Option<Verdict>,
    pub primary_factor: PrimaryFactor,
    pub reason: String,
    /// Labels of every rule that contributed, for downstream explanation.
    pub factors: Vec<String>,
}

/// Decide the verdict under strict precedence, first match wins:
/// not-applicable, critical flag / index floor (NO_GO), gates (CLARIFY),
/// mid band (CLARIFY), then GO.
pub fn decide(
    index: &ClarityIndex,
    flags: &[Flag],
    gates: &GateOutcome,
    variant: &VariantConfig,
    thresholds: &ScoringThresholds,
) -> Recommendation {
    let low = thresholds.effective_index_low();
    let high = thresholds.effective_index_high();

    let critical_count = flags
        .iter()
        .filter(|f| f.severity == Severity::Critical)
        .count();

    let mut factors = Vec::new();
    if critical_count > 0 {
        factors.push(format!("{critical_count} critical flag(s)"));
    }
    for gate in &gates.gates {
        factors.push(format!("gate {}: {}", gate.id.code(), gate.detail));
    }
    if let Some(value) = index.value {
        factors.push(format!("clarity index {value:.1}"));
    }

    let recommendation = if !index.computed {
        Recommendation {
            verdict: None,
            primary_factor: PrimaryFactor::NotApplicable,
            reason: format!("Variant {} does not compute a clarity index", variant.name),
            factors,
        }
    } else if critical_count > 0 {
        // A critical contradiction always wins, even over a high index.
        Recommendation {
            verdict: Some(Verdict::NoGo),
            primary_factor: PrimaryFactor::CriticalFlag,
            reason: format!(
                "{critical_count} critical contradiction(s) override the index"
            ),
            factors,
        }
    } else {
        match index.value {
            None => {
                let primary_factor = if gates.has_gates {
                    PrimaryFactor::GateFired
                } else {
                    PrimaryFactor::InsufficientData
                };
                Recommendation {
                    verdict: Some(Verdict::Clarify),
                    primary_factor,
                    reason: "Not enough answers to compute the clarity index".to_string(),
                    factors,
                }
            }
            Some(value) if value < low => Recommendation {
                verdict: Some(Verdict::NoGo),
                primary_factor: PrimaryFactor::IndexBelowFloor,
                reason: format!("Clarity index {value:.1} is below {low:.0}"),
                factors,
            },
            Some(value) if gates.has_gates => Recommendation {
                verdict: Some(Verdict::Clarify),
                primary_factor: PrimaryFactor::GateFired,
                reason: format!(
                    "{} gate(s) fired despite clarity index {value:.1}",
                    gates.gates.len()
                ),
                factors,
            },
            Some(value) if value < high => Recommendation {
                verdict: Some(Verdict::Clarify),
                primary_factor: PrimaryFactor::IndexMidBand,
                reason: format!(
                    "Clarity index {value:.1} is between {low:.0} and {high:.0}"
                ),
                factors,
            },
            Some(value) => Recommendation {
                verdict: Some(Verdict::Go),
                primary_factor: PrimaryFactor::IndexClear,
                reason: format!("Clarity index {value:.1} clears {high:.0} with no overrides"),
                factors,
            },
        }
    };

    debug!(
        verdict = ?recommendation.verdict,
        factor = ?recommendation.primary_factor,
        "recommendation decided"
    );
    recommendation
}
