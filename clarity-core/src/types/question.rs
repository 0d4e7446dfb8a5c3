//! Question definitions and grouping tags.
//!
//! Group tags wire questions into the contradiction detectors: a triad links
//! a claim to its evidence and consequence, a contradiction group links the
//! same underlying fact rated by two roles, and so on. A question carries
//! only the tags relevant to it; all tags are optional.

use serde::{Deserialize, Serialize};

use super::answer::AnswerType;
use super::dimension::Dimension;
use super::role::Role;

/// Position of a question inside a claim/evidence/consequence triad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriadPart {
    /// The headline claim (Likert).
    Claim,
    /// Supporting evidence strength (single-select).
    Evidence,
    /// Who owns the consequence if the claim fails (single-select).
    Consequence,
}

/// Position inside a confidence/evidence pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidencePart {
    /// Stated confidence (Likert).
    Confidence,
    /// Evidence-strength classifier (single-select).
    Evidence,
}

/// Which side of a forced trade-off pair a question probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeOffSide {
    Business,
    Technology,
}

/// Early or late phase of a time-separated question pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePhase {
    Early,
    Late,
}

/// Designation used by the adoption-risk gate (G3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateProbe {
    /// Expected user friction, rated by the affected role.
    Friction,
    /// Self-assessed readiness, rated by the implementing role.
    Readiness,
}

/// An immutable question definition, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionDefinition {
    pub id: String,
    pub role: Role,
    pub dimension: Dimension,
    pub answer_type: AnswerType,
    /// Reverse-scored: agreement indicates a problem, so 5 normalizes to 0.
    pub is_reverse: bool,
    /// Optional process-area label for per-area process scoring.
    pub process_area: Option<String>,

    // Group tags. Questions sharing a tag value belong to the same group.
    pub reverse_pair_id: Option<String>,
    pub triad_group: Option<String>,
    pub triad_part: Option<TriadPart>,
    pub contradiction_group: Option<String>,
    pub confidence_pair_id: Option<String>,
    pub confidence_part: Option<ConfidencePart>,
    pub ownership_group: Option<String>,
    pub trade_off_group: Option<String>,
    pub trade_off_side: Option<TradeOffSide>,
    pub time_pair_id: Option<String>,
    pub time_phase: Option<TimePhase>,
    pub gate_probe: Option<GateProbe>,
}

impl Default for QuestionDefinition {
    fn default() -> Self {
        Self {
            id: String::new(),
            role: Role::Executive,
            dimension: Dimension::StrategicIntent,
            answer_type: AnswerType::Likert,
            is_reverse: false,
            process_area: None,
            reverse_pair_id: None,
            triad_group: None,
            triad_part: None,
            contradiction_group: None,
            confidence_pair_id: None,
            confidence_part: None,
            ownership_group: None,
            trade_off_group: None,
            trade_off_side: None,
            time_pair_id: None,
            time_phase: None,
            gate_probe: None,
        }
    }
}

impl QuestionDefinition {
    /// A plain Likert question with no group tags.
    pub fn likert(id: impl Into<String>, role: Role, dimension: Dimension) -> Self {
        Self {
            id: id.into(),
            role,
            dimension,
            answer_type: AnswerType::Likert,
            ..Self::default()
        }
    }
}
