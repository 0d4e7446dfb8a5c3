//! Detector 6: forced trade-off / capacity illusion.
//!
//! A trade-off pair forces the business side and the technology side to
//! name what gives way. Claiming "nothing will be impacted" on one side is
//! a role-specific warning; claiming it on both sides confirms the
//! capacity illusion and emits only the critical flag.

use smallvec::smallvec;

use clarity_core::types::{Severity, TradeOffSide};

use super::context::DetectionContext;
use super::types::{Flag, FlagEvidence, FlagId, NOTHING_IMPACTED_SENTINEL};
use super::FlagDetector;

pub struct TradeOffDetector;

impl FlagDetector for TradeOffDetector {
    fn id(&self) -> &'static str {
        "trade-off"
    }

    fn detect(&self, ctx: &DetectionContext<'_>) -> Vec<Flag> {
        let mut flags = Vec::new();

        for key in ctx.registry.trade_off_keys() {
            let members: Vec<_> = ctx.registry.trade_off_group(key).collect();
            let business_q = members
                .iter()
                .find(|q| q.trade_off_side == Some(TradeOffSide::Business));
            let technology_q = members
                .iter()
                .find(|q| q.trade_off_side == Some(TradeOffSide::Technology));
            let (Some(business_q), Some(technology_q)) = (business_q, technology_q) else {
                continue;
            };

            let business_denial = denial_participant(ctx, &business_q.id);
            let technology_denial = denial_participant(ctx, &technology_q.id);

            match (business_denial, technology_denial) {
                (Some(business_p), Some(technology_p)) => {
                    flags.push(Flag::new(
                        FlagId::CapacityIllusionConfirmed,
                        Severity::Critical,
                        FlagEvidence {
                            question_ids: smallvec![
                                business_q.id.clone(),
                                technology_q.id.clone()
                            ],
                            participant_ids: smallvec![business_p, technology_p],
                            values: smallvec![
                                NOTHING_IMPACTED_SENTINEL.to_string(),
                                NOTHING_IMPACTED_SENTINEL.to_string()
                            ],
                            detail: format!(
                                "Both sides of trade-off {key} claim nothing will be impacted"
                            ),
                        },
                    ));
                }
                (Some(business_p), None) => {
                    flags.push(side_flag(
                        FlagId::CapacityIllusionBusiness,
                        &business_q.id,
                        business_p,
                        key,
                        "business",
                    ));
                }
                (None, Some(technology_p)) => {
                    flags.push(side_flag(
                        FlagId::CapacityIllusionTech,
                        &technology_q.id,
                        technology_p,
                        key,
                        "technology",
                    ));
                }
                (None, None) => {}
            }
        }

        flags
    }
}

/// The participant-sorted first respondent who picked the denial option.
fn denial_participant(ctx: &DetectionContext<'_>, question_id: &str) -> Option<String> {
    let mut deniers: Vec<&str> = ctx
        .snapshot
        .for_question(question_id)
        .filter(|a| a.value.as_selection() == Some(NOTHING_IMPACTED_SENTINEL))
        .map(|a| a.participant_id)
        .collect();
    deniers.sort_unstable();
    deniers.first().map(|p| p.to_string())
}

fn side_flag(
    id: FlagId,
    question_id: &str,
    participant: String,
    key: &str,
    side: &str,
) -> Flag {
    Flag::new(
        id,
        Severity::Warn,
        FlagEvidence {
            question_ids: smallvec![question_id.to_string()],
            participant_ids: smallvec![participant],
            values: smallvec![NOTHING_IMPACTED_SENTINEL.to_string()],
            detail: format!("The {side} side of trade-off {key} claims nothing will be impacted"),
        },
    )
}
