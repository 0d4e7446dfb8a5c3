//! Detector 1: reversed-logic contradiction.
//!
//! A question and its designated reverse-scored pair, answered by the same
//! respondent within one role, both normalizing to adjusted ≥ 4.

use smallvec::smallvec;

use clarity_core::types::Severity;

use super::context::DetectionContext;
use super::types::{Flag, FlagEvidence, FlagId};
use super::FlagDetector;

const HIGH_ADJUSTED: u8 = 4;

pub struct ReversedPairDetector;

impl FlagDetector for ReversedPairDetector {
    fn id(&self) -> &'static str {
        "reversed-pair"
    }

    fn detect(&self, ctx: &DetectionContext<'_>) -> Vec<Flag> {
        let mut flags = Vec::new();

        for key in ctx.registry.reverse_pair_keys() {
            let members: Vec<_> = ctx.registry.reverse_pair(key).collect();
            let Some(straight) = members.iter().find(|q| !q.is_reverse) else {
                continue;
            };
            let Some(reversed) = members.iter().find(|q| q.is_reverse) else {
                continue;
            };
            // Pairs are same-role by catalog construction; a mismatched pair
            // is not this detector's pattern.
            if straight.role != reversed.role {
                continue;
            }

            for straight_answer in ctx.snapshot.for_question(&straight.id) {
                let Some(straight_norm) = straight_answer.normalized else {
                    continue;
                };
                let Some(reversed_answer) = ctx
                    .snapshot
                    .for_participant(&reversed.id, straight_answer.participant_id)
                else {
                    continue;
                };
                let Some(reversed_norm) = reversed_answer.normalized else {
                    continue;
                };

                if straight_norm.adjusted >= HIGH_ADJUSTED
                    && reversed_norm.adjusted >= HIGH_ADJUSTED
                {
                    flags.push(Flag::new(
                        FlagId::ReversedPairConflict,
                        Severity::Warn,
                        FlagEvidence {
                            question_ids: smallvec![straight.id.clone(), reversed.id.clone()],
                            participant_ids: smallvec![
                                straight_answer.participant_id.to_string()
                            ],
                            values: smallvec![
                                straight_norm.raw.to_string(),
                                reversed_norm.raw.to_string()
                            ],
                            detail: format!(
                                "{} role affirms both sides of reverse pair {key}",
                                straight.role
                            ),
                        },
                    ));
                }
            }
        }

        flags
    }
}
