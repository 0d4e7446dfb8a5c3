//! Detector 3: confidence vs evidence mismatch.
//!
//! High stated confidence paired with the evidence-strength classifier:
//! anecdotal support is critical, partial support is a warning, verified
//! support clears the pattern.

use smallvec::smallvec;

use clarity_core::types::{ConfidencePart, Severity};

use super::context::DetectionContext;
use super::types::{EvidenceStrength, Flag, FlagEvidence, FlagId};
use super::FlagDetector;

const HIGH_ADJUSTED: u8 = 4;

pub struct ConfidenceEvidenceDetector;

impl FlagDetector for ConfidenceEvidenceDetector {
    fn id(&self) -> &'static str {
        "confidence-evidence"
    }

    fn detect(&self, ctx: &DetectionContext<'_>) -> Vec<Flag> {
        let mut flags = Vec::new();

        for key in ctx.registry.confidence_pair_keys() {
            let members: Vec<_> = ctx.registry.confidence_pair(key).collect();
            let confidence_q = members
                .iter()
                .find(|q| q.confidence_part == Some(ConfidencePart::Confidence));
            let evidence_q = members
                .iter()
                .find(|q| q.confidence_part == Some(ConfidencePart::Evidence));
            let (Some(confidence_q), Some(evidence_q)) = (confidence_q, evidence_q) else {
                continue;
            };

            for confidence_answer in ctx.snapshot.for_question(&confidence_q.id) {
                let Some(confidence_norm) = confidence_answer.normalized else {
                    continue;
                };
                if confidence_norm.adjusted < HIGH_ADJUSTED {
                    continue;
                }

                let evidence_answer = ctx
                    .snapshot
                    .for_participant(&evidence_q.id, confidence_answer.participant_id)
                    .or_else(|| ctx.snapshot.first_answer(&evidence_q.id));
                let Some(option) = evidence_answer.and_then(|a| a.value.as_selection()) else {
                    continue;
                };
                let Some(strength) = EvidenceStrength::from_option(option) else {
                    continue;
                };

                let severity = match strength {
                    EvidenceStrength::Anecdotal => Severity::Critical,
                    EvidenceStrength::Partial => Severity::Warn,
                    EvidenceStrength::Verified => continue,
                };

                flags.push(Flag::new(
                    FlagId::ConfidenceWithoutEvidence,
                    severity,
                    FlagEvidence {
                        question_ids: smallvec![confidence_q.id.clone(), evidence_q.id.clone()],
                        participant_ids: smallvec![
                            confidence_answer.participant_id.to_string()
                        ],
                        values: smallvec![
                            confidence_norm.raw.to_string(),
                            option.to_string()
                        ],
                        detail: format!(
                            "Confidence {} in pair {key} backed by {option} evidence",
                            confidence_norm.raw
                        ),
                    },
                ));
            }
        }

        flags
    }
}
