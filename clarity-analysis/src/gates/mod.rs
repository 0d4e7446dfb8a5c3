//! Gate evaluator — four independent threshold checks that can force the
//! recommendation down to at least CLARIFY regardless of the index value.
//!
//! Gates are additive: any subset can fire on one evaluation. A gate whose
//! precondition is absent (inactive dimension, missing probes, null score)
//! does not fire — "no data" never trips a floor.

use serde::Serialize;
use std::fmt;
use tracing::info;

use clarity_core::config::{ScoringThresholds, VariantConfig};
use clarity_core::types::{Dimension, GateProbe, Severity};

use crate::flags::types::{Flag, FlagId};
use crate::normalize::mean_of;
use crate::scoring::{DimensionScoreSet, ProcessScores};
use crate::snapshot::AnswerSnapshot;

/// The four gate checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateId {
    /// G1 — an index dimension scored below the floor.
    DimensionFloor,
    /// G2 — the gate-only process dimension scored below the floor.
    ProcessFloor,
    /// G3 — high user friction and high readiness claimed simultaneously.
    AdoptionConflict,
    /// G4 — ownership diffusion fired at critical severity.
    CriticalOwnership,
}

impl GateId {
    pub fn code(&self) -> &'static str {
        match self {
            Self::DimensionFloor => "G1",
            Self::ProcessFloor => "G2",
            Self::AdoptionConflict => "G3",
            Self::CriticalOwnership => "G4",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::DimensionFloor => "dimension_floor",
            Self::ProcessFloor => "process_floor",
            Self::AdoptionConflict => "adoption_conflict",
            Self::CriticalOwnership => "critical_ownership",
        }
    }
}

impl fmt::Display for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.name())
    }
}

/// What a fired gate forces downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateAction {
    /// The final verdict may not be better than CLARIFY.
    RequireClarify,
}

/// One fired gate with the evidence to explain it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gate {
    pub id: GateId,
    pub action: GateAction,
    /// The dimension that tripped a floor gate, when applicable.
    pub dimension: Option<Dimension>,
    /// The flag that tripped a flag-linked gate, when applicable.
    pub flag_id: Option<FlagId>,
    pub detail: String,
}

/// Output of one gate evaluation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GateOutcome {
    pub gates: Vec<Gate>,
    pub has_gates: bool,
}

/// Evaluate all four gates.
pub fn evaluate_all_gates(
    case: &DimensionScoreSet,
    process: &ProcessScores,
    flags: &[Flag],
    snapshot: &AnswerSnapshot<'_>,
    variant: &VariantConfig,
    thresholds: &ScoringThresholds,
) -> GateOutcome {
    let mut gates = Vec::new();
    gates.extend(dimension_floor(case, variant, thresholds));
    gates.extend(process_floor(process, variant, thresholds));
    gates.extend(adoption_conflict(snapshot, thresholds));
    gates.extend(critical_ownership(flags));

    for gate in &gates {
        info!(gate = %gate.id, detail = %gate.detail, "gate fired");
    }

    let has_gates = !gates.is_empty();
    GateOutcome { gates, has_gates }
}

/// G1: any index dimension below the floor, one gate per failing dimension.
fn dimension_floor(
    case: &DimensionScoreSet,
    variant: &VariantConfig,
    thresholds: &ScoringThresholds,
) -> Vec<Gate> {
    if !variant.computes_index {
        return Vec::new();
    }
    let floor = thresholds.effective_dimension_floor();
    Dimension::INDEX
        .iter()
        .filter_map(|dimension| {
            let score = case.get(*dimension)?;
            if score >= floor {
                return None;
            }
            Some(Gate {
                id: GateId::DimensionFloor,
                action: GateAction::RequireClarify,
                dimension: Some(*dimension),
                flag_id: None,
                detail: format!("{dimension} scored {score:.1}, below floor {floor:.0}"),
            })
        })
        .collect()
}

/// G2: process-readiness case score below the floor. Only evaluated when
/// the variant activates the gate-only dimension; a null score (not enough
/// answers yet) does not fire.
fn process_floor(
    process: &ProcessScores,
    variant: &VariantConfig,
    thresholds: &ScoringThresholds,
) -> Vec<Gate> {
    if !variant.process_dimension_active {
        return Vec::new();
    }
    let floor = thresholds.effective_dimension_floor();
    let Some(overall) = process.overall else {
        return Vec::new();
    };
    if overall >= floor {
        return Vec::new();
    }

    let detail = match process.weakest_area() {
        Some(area) => format!(
            "process readiness scored {overall:.1}, below floor {floor:.0} (weakest area: {})",
            area.area
        ),
        None => format!("process readiness scored {overall:.1}, below floor {floor:.0}"),
    };
    vec![Gate {
        id: GateId::ProcessFloor,
        action: GateAction::RequireClarify,
        dimension: Some(Dimension::ProcessReadiness),
        flag_id: None,
        detail,
    }]
}

/// G3: the designated friction probe and readiness probe are both high at
/// the same time — incongruent self-assessment between the affected role
/// and the implementing role.
fn adoption_conflict(
    snapshot: &AnswerSnapshot<'_>,
    thresholds: &ScoringThresholds,
) -> Vec<Gate> {
    let high = thresholds.effective_probe_high();
    let Some((friction, friction_roles)) = probe_score(snapshot, GateProbe::Friction) else {
        return Vec::new();
    };
    let Some((readiness, readiness_roles)) = probe_score(snapshot, GateProbe::Readiness) else {
        return Vec::new();
    };
    // The probes must come from different roles to be a cross-role conflict.
    if friction_roles == readiness_roles {
        return Vec::new();
    }
    if friction < high || readiness < high {
        return Vec::new();
    }

    vec![Gate {
        id: GateId::AdoptionConflict,
        action: GateAction::RequireClarify,
        dimension: None,
        flag_id: None,
        detail: format!(
            "user friction {friction:.1} and claimed readiness {readiness:.1} are both high"
        ),
    }]
}

/// Mean probe score plus the sorted roles that answered it.
fn probe_score(snapshot: &AnswerSnapshot<'_>, probe: GateProbe) -> Option<(f64, Vec<&'static str>)> {
    let mut scores = Vec::new();
    let mut roles = Vec::new();
    for answer in snapshot.iter() {
        if answer.question.gate_probe != Some(probe) {
            continue;
        }
        if let Some(normalized) = answer.normalized {
            scores.push(normalized.score);
            roles.push(answer.role.name());
        }
    }
    roles.sort_unstable();
    roles.dedup();
    mean_of(&scores).map(|mean| (mean, roles))
}

/// G4: ownership diffusion at critical severity, independent of the index.
fn critical_ownership(flags: &[Flag]) -> Vec<Gate> {
    flags
        .iter()
        .filter(|f| f.id == FlagId::OwnershipDiffusion && f.severity == Severity::Critical)
        .map(|flag| Gate {
            id: GateId::CriticalOwnership,
            action: GateAction::RequireClarify,
            dimension: None,
            flag_id: Some(flag.id),
            detail: flag.evidence.detail.clone(),
        })
        .collect()
}
