//! Detector 7: time-separated consistency.
//!
//! An early-survey claim of simplicity and a late-survey acknowledgment of
//! complexity, both high, from the same respondent.

use smallvec::smallvec;

use clarity_core::types::{Severity, TimePhase};

use super::context::DetectionContext;
use super::types::{Flag, FlagEvidence, FlagId};
use super::FlagDetector;

const HIGH_ADJUSTED: u8 = 4;

pub struct TimeConsistencyDetector;

impl FlagDetector for TimeConsistencyDetector {
    fn id(&self) -> &'static str {
        "time-consistency"
    }

    fn detect(&self, ctx: &DetectionContext<'_>) -> Vec<Flag> {
        let mut flags = Vec::new();

        for key in ctx.registry.time_pair_keys() {
            let members: Vec<_> = ctx.registry.time_pair(key).collect();
            let early_q = members.iter().find(|q| q.time_phase == Some(TimePhase::Early));
            let late_q = members.iter().find(|q| q.time_phase == Some(TimePhase::Late));
            let (Some(early_q), Some(late_q)) = (early_q, late_q) else {
                continue;
            };

            for early_answer in ctx.snapshot.for_question(&early_q.id) {
                let Some(early_norm) = early_answer.normalized else {
                    continue;
                };
                if early_norm.adjusted < HIGH_ADJUSTED {
                    continue;
                }
                let Some(late_answer) = ctx
                    .snapshot
                    .for_participant(&late_q.id, early_answer.participant_id)
                else {
                    continue;
                };
                let Some(late_norm) = late_answer.normalized else {
                    continue;
                };
                if late_norm.adjusted < HIGH_ADJUSTED {
                    continue;
                }

                flags.push(Flag::new(
                    FlagId::TimeInconsistency,
                    Severity::Warn,
                    FlagEvidence {
                        question_ids: smallvec![early_q.id.clone(), late_q.id.clone()],
                        participant_ids: smallvec![early_answer.participant_id.to_string()],
                        values: smallvec![
                            early_norm.raw.to_string(),
                            late_norm.raw.to_string()
                        ],
                        detail: format!(
                            "Early simplicity claim and late complexity acknowledgment both high in pair {key}"
                        ),
                    },
                ));
            }
        }

        flags
    }
}
