//! Score containers.
//!
//! Every score slot is `Option<f64>`: `None` means "insufficient data for
//! this dimension" and propagates — it is never coerced to 0, which would
//! be indistinguishable from the worst possible answer.

use serde::Serialize;

use clarity_core::types::{Dimension, Role};

/// Per-dimension 0–100 scores, nullable per slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DimensionScoreSet {
    pub strategic_intent: Option<f64>,
    pub value_economics: Option<f64>,
    pub readiness: Option<f64>,
    pub risk: Option<f64>,
    pub governance: Option<f64>,
    pub process_readiness: Option<f64>,
}

impl DimensionScoreSet {
    pub fn get(&self, dimension: Dimension) -> Option<f64> {
        match dimension {
            Dimension::StrategicIntent => self.strategic_intent,
            Dimension::ValueEconomics => self.value_economics,
            Dimension::Readiness => self.readiness,
            Dimension::Risk => self.risk,
            Dimension::Governance => self.governance,
            Dimension::ProcessReadiness => self.process_readiness,
        }
    }

    pub fn set(&mut self, dimension: Dimension, score: Option<f64>) {
        let slot = match dimension {
            Dimension::StrategicIntent => &mut self.strategic_intent,
            Dimension::ValueEconomics => &mut self.value_economics,
            Dimension::Readiness => &mut self.readiness,
            Dimension::Risk => &mut self.risk,
            Dimension::Governance => &mut self.governance,
            Dimension::ProcessReadiness => &mut self.process_readiness,
        };
        *slot = score;
    }

    /// True when every slot is `None`.
    pub fn is_empty(&self) -> bool {
        Dimension::ALL.iter().all(|d| self.get(*d).is_none())
    }
}

/// One role's dimension scores.
#[derive(Debug, Clone, Serialize)]
pub struct RoleScores {
    pub role: Role,
    pub scores: DimensionScoreSet,
}

/// The full scoring output: case-level plus per-role breakdowns.
///
/// `roles` is ordered by the canonical role order, so serialization and
/// float iteration are deterministic.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScoreBoard {
    pub case: DimensionScoreSet,
    pub roles: Vec<RoleScores>,
}

impl ScoreBoard {
    pub fn role(&self, role: Role) -> Option<&DimensionScoreSet> {
        self.roles.iter().find(|r| r.role == role).map(|r| &r.scores)
    }
}
