//! Detector 5: ownership diffusion.
//!
//! Collects "who owns this" answers across roles. Three or more distinct
//! owners — or any answer naming the no-owner sentinel — is critical, even
//! with only two distinct answers. Exactly two distinct non-sentinel owners
//! is a disagreement worth a warning; one agreed owner is clean.

use smallvec::SmallVec;

use clarity_core::types::Severity;

use super::context::DetectionContext;
use super::types::{Flag, FlagEvidence, FlagId, NO_OWNER_SENTINEL};
use super::FlagDetector;

pub struct OwnershipDetector;

impl FlagDetector for OwnershipDetector {
    fn id(&self) -> &'static str {
        "ownership"
    }

    fn detect(&self, ctx: &DetectionContext<'_>) -> Vec<Flag> {
        let mut flags = Vec::new();

        for key in ctx.registry.ownership_keys() {
            let mut question_ids: SmallVec<[String; 4]> = SmallVec::new();
            let mut participant_ids: SmallVec<[String; 2]> = SmallVec::new();
            let mut owners: Vec<String> = Vec::new();

            for question in ctx.registry.ownership_group(key) {
                for answer in ctx.snapshot.for_question(&question.id) {
                    let Some(owner) = answer.value.as_selection() else {
                        continue;
                    };
                    question_ids.push(question.id.clone());
                    participant_ids.push(answer.participant_id.to_string());
                    owners.push(owner.trim().to_lowercase());
                }
            }

            if owners.is_empty() {
                continue;
            }

            let mut distinct = owners.clone();
            distinct.sort_unstable();
            distinct.dedup();
            let sentinel_named = distinct.iter().any(|o| o == NO_OWNER_SENTINEL);

            let severity = if sentinel_named || distinct.len() >= 3 {
                Severity::Critical
            } else if distinct.len() == 2 {
                Severity::Warn
            } else {
                continue;
            };

            let detail = if sentinel_named {
                format!("Ownership of {key} explicitly marked as not clearly defined")
            } else {
                format!(
                    "Ownership of {key} claimed by {} different answers",
                    distinct.len()
                )
            };

            flags.push(Flag::new(
                FlagId::OwnershipDiffusion,
                severity,
                FlagEvidence {
                    question_ids,
                    participant_ids,
                    values: distinct.into_iter().collect(),
                    detail,
                },
            ));
        }

        flags
    }
}
