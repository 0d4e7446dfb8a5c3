//! Dimension scoring: role-level aggregation and the weighted case score.

use tracing::debug;

use clarity_core::config::VariantConfig;
use clarity_core::types::collections::FxHashMap;
use clarity_core::types::{Dimension, Role};

use crate::normalize::mean_of;
use crate::snapshot::AnswerSnapshot;

use super::types::{DimensionScoreSet, RoleScores, ScoreBoard};

/// Score every dimension at role level, then aggregate to case level.
///
/// Role-level: answers are averaged per participant first, then across
/// participants, so a prolific respondent cannot dominate their role.
/// Case-level: weighted sum over the roles with a non-null score for the
/// dimension, with weights renormalized over those roles — partial
/// participation must not silently deflate the score. All-null stays null.
pub fn score_dimensions(snapshot: &AnswerSnapshot<'_>, variant: &VariantConfig) -> ScoreBoard {
    let mut roles = Vec::with_capacity(variant.active_roles.len());

    // Canonical role order keeps float summation bit-stable across runs.
    for role in Role::ALL {
        if !variant.active_roles.contains(&role) {
            continue;
        }
        let mut scores = DimensionScoreSet::default();
        for dimension in Dimension::ALL {
            scores.set(dimension, role_dimension_score(snapshot, role, dimension));
        }
        roles.push(RoleScores { role, scores });
    }

    let mut case = DimensionScoreSet::default();
    for dimension in Dimension::ALL {
        case.set(dimension, case_score(&roles, variant, dimension));
    }

    debug!(variant = %variant.name, roles = roles.len(), "dimension scoring complete");
    ScoreBoard { case, roles }
}

/// Average the normalized scores of one (role, dimension) cell:
/// per participant first, then across participants. `None` when the cell
/// has no valid Likert answers.
fn role_dimension_score(
    snapshot: &AnswerSnapshot<'_>,
    role: Role,
    dimension: Dimension,
) -> Option<f64> {
    let mut per_participant: FxHashMap<&str, Vec<f64>> = FxHashMap::default();
    for answer in snapshot.iter() {
        if answer.role != role || answer.question.dimension != dimension {
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

    let participant_means: Vec<f64> = participants
        .iter()
        .filter_map(|p| mean_of(&per_participant[p]))
        .collect();
    mean_of(&participant_means)
}

/// Weighted case score for one dimension, renormalized over the roles that
/// actually have data.
fn case_score(roles: &[RoleScores], variant: &VariantConfig, dimension: Dimension) -> Option<f64> {
    let mut weighted_sum = 0.0;
    let mut weight_sum = 0.0;
    for role_scores in roles {
        let weight = variant.role_weight(role_scores.role);
        if weight == 0.0 {
            continue;
        }
        if let Some(score) = role_scores.scores.get(dimension) {
            weighted_sum += weight * score;
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

    fn setup() -> (QuestionRegistry, VariantConfig) {
        let questions = vec![
            QuestionDefinition::likert("exec_risk", Role::Executive, Dimension::Risk),
            QuestionDefinition::likert("fin_risk", Role::Finance, Dimension::Risk),
            QuestionDefinition::likert("ops_risk", Role::Operations, Dimension::Risk),
        ];
        (
            QuestionRegistry::build(questions).unwrap(),
            VariantConfig::executive_alignment(),
        )
    }

    #[test]
    fn participants_average_before_roles() {
        let (registry, variant) = setup();
        // Two executives: one answers twice (5, 5), the other once (1).
        // Participant-first averaging: (100 + 0) / 2 = 50, not (100+100+0)/3.
        let answers = vec![
            Answer::new("exec_risk", "p1", Role::Executive, AnswerValue::Likert(5)),
            Answer::new("exec_risk", "p1", Role::Executive, AnswerValue::Likert(5)),
            Answer::new("exec_risk", "p2", Role::Executive, AnswerValue::Likert(1)),
        ];
        let (snapshot, _) = AnswerSnapshot::build(&registry, &answers, &variant);
        let board = score_dimensions(&snapshot, &variant);
        assert_eq!(board.role(Role::Executive).unwrap().risk, Some(50.0));
    }

    #[test]
    fn missing_dimension_stays_null() {
        let (registry, variant) = setup();
        let answers = vec![Answer::new(
            "exec_risk",
            "p1",
            Role::Executive,
            AnswerValue::Likert(4),
        )];
        let (snapshot, _) = AnswerSnapshot::build(&registry, &answers, &variant);
        let board = score_dimensions(&snapshot, &variant);
        assert_eq!(board.role(Role::Executive).unwrap().governance, None);
        assert_eq!(board.case.governance, None);
    }

    #[test]
    fn case_score_renormalizes_over_answering_roles() {
        let (registry, variant) = setup();
        // Only executive (weight 0.40) and finance (weight 0.30) answered.
        // Weights renormalize: (0.40*100 + 0.30*50) / 0.70.
        let answers = vec![
            Answer::new("exec_risk", "p1", Role::Executive, AnswerValue::Likert(5)),
            Answer::new("fin_risk", "p2", Role::Finance, AnswerValue::Likert(3)),
        ];
        let (snapshot, _) = AnswerSnapshot::build(&registry, &answers, &variant);
        let board = score_dimensions(&snapshot, &variant);
        let expected = (0.40 * 100.0 + 0.30 * 50.0) / 0.70;
        assert_eq!(board.case.risk, Some(expected));
    }

    #[test]
    fn all_roles_null_keeps_case_null() {
        let (registry, variant) = setup();
        let (snapshot, _) = AnswerSnapshot::build(&registry, &[], &variant);
        let board = score_dimensions(&snapshot, &variant);
        assert_eq!(board.case.risk, None);
    }

    #[test]
    fn reevaluation_is_bit_identical() {
        let (registry, variant) = setup();
        let answers = vec![
            Answer::new("exec_risk", "p1", Role::Executive, AnswerValue::Likert(5)),
            Answer::new("fin_risk", "p2", Role::Finance, AnswerValue::Likert(2)),
            Answer::new("ops_risk", "p3", Role::Operations, AnswerValue::Likert(4)),
        ];
        let (snapshot, _) = AnswerSnapshot::build(&registry, &answers, &variant);
        let a = score_dimensions(&snapshot, &variant);
        let b = score_dimensions(&snapshot, &variant);
        assert_eq!(a.case, b.case);
    }
}
