//! Per-process-area scoring for multi-process assessments.
//!
//! The gate-only `ProcessReadiness` dimension is scored like any other at
//! case level; this module adds the per-area breakdown so G2's evidence can
//! name the weakest area.

use serde::Serialize;
use tracing::debug;

use clarity_core::config::VariantConfig;
use clarity_core::types::collections::FxHashMap;
use clarity_core::types::{Dimension, Role};

use crate::normalize::mean_of;
use crate::snapshot::AnswerSnapshot;

/// One process area's aggregated score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaScore {
    pub area: String,
    pub score: Option<f64>,
}

/// Process-readiness scoring output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProcessScores {
    /// Case-level process-readiness score (the value G2 checks).
    pub overall: Option<f64>,
    /// Per-area breakdown, sorted by area name.
    pub areas: Vec<AreaScore>,
}

impl ProcessScores {
    /// The area with the lowest non-null score, for gate evidence.
    pub fn weakest_area(&self) -> Option<&AreaScore> {
        self.areas
            .iter()
            .filter(|a| a.score.is_some())
            .min_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal))
    }
}

/// Score `ProcessReadiness` per process area.
///
/// Within an area: per-participant average first, then per role, then the
/// variant's role weights renormalized over answering roles — the same
/// shape as the dimension scorer. `overall` is the weighted aggregate over
/// all process-readiness answers regardless of area, which matches the
/// case-level dimension score.
pub fn score_process_areas(
    snapshot: &AnswerSnapshot<'_>,
    variant: &VariantConfig,
    overall: Option<f64>,
) -> ProcessScores {
    if !variant.process_dimension_active {
        return ProcessScores::default();
    }

    let mut area_names: Vec<&str> = snapshot
        .iter()
        .filter(|a| a.question.dimension == Dimension::ProcessReadiness)
        .filter_map(|a| a.question.process_area.as_deref())
        .collect();
    area_names.sort_unstable();
    area_names.dedup();

    let areas: Vec<AreaScore> = area_names
        .into_iter()
        .map(|area| AreaScore {
            area: area.to_string(),
            score: area_score(snapshot, variant, area),
        })
        .collect();

    debug!(variant = %variant.name, areas = areas.len(), "process scoring complete");
    ProcessScores { overall, areas }
}

fn area_score(snapshot: &AnswerSnapshot<'_>, variant: &VariantConfig, area: &str) -> Option<f64> {
    let mut weighted_sum = 0.0;
    let mut weight_sum = 0.0;

    for role in Role::ALL {
        let weight = variant.role_weight(role);
        if weight == 0.0 {
            continue;
        }

        let mut per_participant: FxHashMap<&str, Vec<f64>> = FxHashMap::default();
        for answer in snapshot.iter() {
            if answer.role != role
                || answer.question.dimension != Dimension::ProcessReadiness
                || answer.question.process_area.as_deref() != Some(area)
            {
                continue;
            }
            if let Some(normalized) = answer.normalized {
                per_participant
                    .entry(answer.participant_id)
                    .or_default()
                    .push(normalized.score);
            }
        }

        let mut participants: Vec<&str> = per_participant.keys().copied().collect();
        participants.sort_unstable();
        let means: Vec<f64> = participants
            .iter()
            .filter_map(|p| mean_of(&per_participant[p]))
            .collect();

        if let Some(role_score) = mean_of(&means) {
            weighted_sum += weight * role_score;
            weight_sum += weight;
        }
    }

    if weight_sum == 0.0 {
        return None;
    }
    Some(weighted_sum / weight_sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clarity_core::registry::QuestionRegistry;
    use clarity_core::types::{Answer, AnswerValue, QuestionDefinition};

    fn process_question(id: &str, role: Role, area: &str) -> QuestionDefinition {
        QuestionDefinition {
            process_area: Some(area.to_string()),
            ..QuestionDefinition::likert(id, role, Dimension::ProcessReadiness)
        }
    }

    #[test]
    fn areas_are_scored_and_sorted() {
        let registry = QuestionRegistry::build(vec![
            process_question("ops_invoicing", Role::Operations, "invoicing"),
            process_question("ops_approvals", Role::Operations, "approvals"),
        ])
        .unwrap();
        let variant = VariantConfig::process_baseline();
        let answers = vec![
            Answer::new("ops_invoicing", "p1", Role::Operations, AnswerValue::Likert(5)),
            Answer::new("ops_approvals", "p1", Role::Operations, AnswerValue::Likert(2)),
        ];
        let (snapshot, _) = AnswerSnapshot::build(&registry, &answers, &variant);
        let process = score_process_areas(&snapshot, &variant, Some(62.5));

        assert_eq!(process.areas.len(), 2);
        assert_eq!(process.areas[0].area, "approvals");
        assert_eq!(process.areas[0].score, Some(25.0));
        assert_eq!(process.areas[1].score, Some(100.0));
        assert_eq!(process.weakest_area().unwrap().area, "approvals");
    }

    #[test]
    fn inactive_process_dimension_yields_empty() {
        let registry = QuestionRegistry::build(vec![]).unwrap();
        let variant = VariantConfig::executive_alignment();
        let (snapshot, _) = AnswerSnapshot::build(&registry, &[], &variant);
        let process = score_process_areas(&snapshot, &variant, None);
        assert_eq!(process, ProcessScores::default());
    }
}
