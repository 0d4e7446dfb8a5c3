//! Detector 4: cross-role mismatch.
//!
//! The same underlying fact rated by two roles. The gap check runs on one
//! canonical scale — adjusted 1–5 units — with 0–100 scores converted via
//! `score_to_adjusted`, never a second threshold.

use smallvec::smallvec;

use clarity_core::types::{QuestionDefinition, Severity};

use crate::normalize::{mean_of, score_to_adjusted};

use super::context::DetectionContext;
use super::types::{Flag, FlagEvidence, FlagId, DATA_READINESS_GROUP};
use super::FlagDetector;

pub struct CrossRoleDetector;

impl FlagDetector for CrossRoleDetector {
    fn id(&self) -> &'static str {
        "cross-role"
    }

    fn detect(&self, ctx: &DetectionContext<'_>) -> Vec<Flag> {
        let gap_threshold = ctx.thresholds.effective_cross_role_gap();
        let mut flags = Vec::new();

        for key in ctx.registry.contradiction_keys() {
            let members: Vec<_> = ctx.registry.contradiction_group(key).collect();

            // Mean 0–100 score per member question, skipping unanswered ones.
            let rated: Vec<(&QuestionDefinition, f64)> = members
                .iter()
                .filter_map(|q| {
                    let scores: Vec<f64> = ctx
                        .snapshot
                        .for_question(&q.id)
                        .filter_map(|a| a.normalized.map(|n| n.score))
                        .collect();
                    mean_of(&scores).map(|mean| (*q, mean))
                })
                .collect();

            let severity = if key == DATA_READINESS_GROUP {
                Severity::Critical
            } else {
                Severity::Warn
            };

            for (i, (question_a, mean_a)) in rated.iter().enumerate() {
                for (question_b, mean_b) in rated.iter().skip(i + 1) {
                    if question_a.role == question_b.role {
                        continue;
                    }
                    let gap =
                        (score_to_adjusted(*mean_a) - score_to_adjusted(*mean_b)).abs();
                    if gap <= gap_threshold {
                        continue;
                    }

                    flags.push(Flag::new(
                        FlagId::CrossRoleMismatch,
                        severity,
                        FlagEvidence {
                            question_ids: smallvec![
                                question_a.id.clone(),
                                question_b.id.clone()
                            ],
                            participant_ids: smallvec![],
                            values: smallvec![
                                format!("{mean_a:.1}"),
                                format!("{mean_b:.1}")
                            ],
                            detail: format!(
                                "{} and {} disagree by {gap:.2} scale points on {key}",
                                question_a.role, question_b.role
                            ),
                        },
                    ));
                }
            }
        }

        flags
    }
}
