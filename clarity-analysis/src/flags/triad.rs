//! Detector 2: claim → proof → consequence triad.
//!
//! A high claim is tested against the strength of its supporting evidence
//! and the ownership of its consequence. The three outcomes are mutually
//! exclusive per claim: weak evidence with an unowned consequence is the
//! critical narrative-inflation pattern and supersedes both WARN variants.

use smallvec::smallvec;

use clarity_core::types::{Severity, TriadPart};

use super::context::DetectionContext;
use super::types::{EvidenceStrength, Flag, FlagEvidence, FlagId, NO_OWNER_SENTINEL};
use super::FlagDetector;

const HIGH_ADJUSTED: u8 = 4;

pub struct TriadDetector;

impl FlagDetector for TriadDetector {
    fn id(&self) -> &'static str {
        "triad"
    }

    fn detect(&self, ctx: &DetectionContext<'_>) -> Vec<Flag> {
        let mut flags = Vec::new();

        for key in ctx.registry.triad_keys() {
            let members: Vec<_> = ctx.registry.triad(key).collect();
            let claim_q = members.iter().find(|q| q.triad_part == Some(TriadPart::Claim));
            let evidence_q = members
                .iter()
                .find(|q| q.triad_part == Some(TriadPart::Evidence));
            let consequence_q = members
                .iter()
                .find(|q| q.triad_part == Some(TriadPart::Consequence));
            let (Some(claim_q), Some(evidence_q), Some(consequence_q)) =
                (claim_q, evidence_q, consequence_q)
            else {
                continue;
            };

            for claim_answer in ctx.snapshot.for_question(&claim_q.id) {
                let Some(claim_norm) = claim_answer.normalized else {
                    continue;
                };
                if claim_norm.adjusted < HIGH_ADJUSTED {
                    continue;
                }

                // Prefer the claimant's own evidence/consequence answers;
                // fall back to the group's single deterministic answer when
                // those questions belong to another respondent.
                let evidence_answer = ctx
                    .snapshot
                    .for_participant(&evidence_q.id, claim_answer.participant_id)
                    .or_else(|| ctx.snapshot.first_answer(&evidence_q.id));
                let consequence_answer = ctx
                    .snapshot
                    .for_participant(&consequence_q.id, claim_answer.participant_id)
                    .or_else(|| ctx.snapshot.first_answer(&consequence_q.id));

                let strength = evidence_answer
                    .and_then(|a| a.value.as_selection())
                    .and_then(EvidenceStrength::from_option);
                let weak_evidence = strength.is_some_and(|s| s.is_weak());
                let unowned = consequence_answer
                    .and_then(|a| a.value.as_selection())
                    .is_some_and(|owner| owner == NO_OWNER_SENTINEL);

                let evidence_value = evidence_answer
                    .and_then(|a| a.value.as_selection())
                    .unwrap_or("unanswered");
                let consequence_value = consequence_answer
                    .and_then(|a| a.value.as_selection())
                    .unwrap_or("unanswered");

                let make_evidence = |detail: String| FlagEvidence {
                    question_ids: smallvec![
                        claim_q.id.clone(),
                        evidence_q.id.clone(),
                        consequence_q.id.clone()
                    ],
                    participant_ids: smallvec![claim_answer.participant_id.to_string()],
                    values: smallvec![
                        claim_norm.raw.to_string(),
                        evidence_value.to_string(),
                        consequence_value.to_string()
                    ],
                    detail,
                };

                if weak_evidence && unowned {
                    flags.push(Flag::new(
                        FlagId::NarrativeInflationRisk,
                        Severity::Critical,
                        make_evidence(format!(
                            "High claim in triad {key} rests on weak evidence with no consequence owner"
                        )),
                    ));
                } else if weak_evidence {
                    flags.push(Flag::new(
                        FlagId::ProofGap,
                        Severity::Warn,
                        make_evidence(format!(
                            "High claim in triad {key} is supported only by weak evidence"
                        )),
                    ));
                } else if unowned {
                    flags.push(Flag::new(
                        FlagId::ConsequenceUnowned,
                        Severity::Warn,
                        make_evidence(format!(
                            "Consequence of high claim in triad {key} has no owner"
                        )),
                    ));
                }
            }
        }

        flags
    }
}
