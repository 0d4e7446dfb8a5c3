//! Read-only projection for the narrative collaborator.
//!
//! Narrative generation is non-deterministic and must never influence the
//! verdict. The boundary is one-way by construction: a [`ResultView`]
//! borrows the finalized result immutably and exposes no write path back
//! into scoring state.

use clarity_core::types::Severity;

use crate::flags::types::{Flag, FlagId};
use crate::pipeline::EvaluationResult;
use crate::recommend::Verdict;

/// Immutable view over a finalized evaluation result.
pub struct ResultView<'a> {
    result: &'a EvaluationResult,
}

impl<'a> ResultView<'a> {
    pub fn new(result: &'a EvaluationResult) -> Self {
        Self { result }
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.result.recommendation.verdict
    }

    pub fn index_value(&self) -> Option<f64> {
        self.result.index.value
    }

    pub fn index_tier(&self) -> Option<&'static str> {
        self.result.index.tier.map(|t| t.name())
    }

    pub fn reason(&self) -> &str {
        &self.result.recommendation.reason
    }

    pub fn factors(&self) -> &[String] {
        &self.result.recommendation.factors
    }

    /// Flags above INFO, for headline narrative.
    pub fn actionable_flags(&self) -> impl Iterator<Item = &Flag> {
        self.result
            .flags
            .iter()
            .filter(|f| f.severity != Severity::Info)
    }

    /// Blind-spot categories from the open-text classifier, for the
    /// blind-spot narrative section only.
    pub fn blind_spot_categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self
            .result
            .flags
            .iter()
            .filter(|f| f.id == FlagId::BlindSpot)
            .flat_map(|f| f.evidence.values.iter().map(String::as_str))
            .collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }

    /// Flag summaries with participant identifiers stripped, for viewers
    /// who must not see respondent-level evidence.
    pub fn redacted_flag_summaries(&self) -> Vec<String> {
        self.result
            .flags
            .iter()
            .map(|f| format!("{} [{}]: {}", f.id, f.severity, f.evidence.detail))
            .collect()
    }

    pub fn fired_gate_codes(&self) -> Vec<&'static str> {
        self.result.gates.gates.iter().map(|g| g.id.code()).collect()
    }
}
