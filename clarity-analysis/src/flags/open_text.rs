//! Detector 8: open-text blind-spot classification.
//!
//! Free-text answers are classified into a closed set of seven categories
//! by a [`TextClassifier`]. The contract is strictly bounded: exactly one
//! of the seven labels or unclassified, nothing else. Classifications feed
//! blind-spot narrative generation only — the flags are always INFO and
//! never reach the clarity index or the recommendation rule.

use aho_corasick::{AhoCorasick, MatchKind};
use smallvec::smallvec;

use clarity_core::types::Severity;

use super::context::DetectionContext;
use super::types::{BlindSpotCategory, Flag, FlagEvidence, FlagId};
use super::FlagDetector;

/// Bounded free-text classifier contract.
pub trait TextClassifier: Send + Sync {
    /// Classify one free-text answer. Must return one of the seven
    /// categories or [`BlindSpotCategory::Unclassified`] — never panic,
    /// never anything outside the closed set.
    fn classify(&self, text: &str) -> BlindSpotCategory;
}

/// Deterministic keyword-based classifier.
///
/// Counts case-insensitive keyword hits per category; the category with
/// the most hits wins, ties broken by canonical category order.
pub struct KeywordClassifier {
    matcher: AhoCorasick,
    pattern_categories: Vec<BlindSpotCategory>,
}

impl KeywordClassifier {
    pub fn new() -> Self {
        let keyword_sets: [(&[&str], BlindSpotCategory); 7] = [
            (
                &["risk", "liability", "exposure", "worried", "concern"],
                BlindSpotCategory::KnownRisk,
            ),
            (
                &["nobody talks", "not discussed", "avoided", "taboo", "elephant"],
                BlindSpotCategory::AvoidedTopic,
            ),
            (
                &["turf", "politics", "blame", "competing priorities", "dispute"],
                BlindSpotCategory::RoleConflict,
            ),
            (
                &["resistance", "pushback", "morale", "old way", "won't adopt"],
                BlindSpotCategory::CulturalResistance,
            ),
            (
                &["legacy", "technical debt", "integration", "untested", "unknown system"],
                BlindSpotCategory::TechnicalUncertainty,
            ),
            (
                &["workaround", "exception", "ad hoc", "keeps changing", "unstable"],
                BlindSpotCategory::ProcessInstability,
            ),
            (
                &["data quality", "duplicates", "missing data", "inconsistent", "manual entry"],
                BlindSpotCategory::DataQuality,
            ),
        ];

        let mut patterns = Vec::new();
        let mut pattern_categories = Vec::new();
        for (keywords, category) in keyword_sets {
            for keyword in keywords {
                patterns.push(*keyword);
                pattern_categories.push(category);
            }
        }

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(&patterns)
            .expect("static keyword patterns compile");

        Self {
            matcher,
            pattern_categories,
        }
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl TextClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> BlindSpotCategory {
        let mut hits = [0usize; BlindSpotCategory::CLASSIFIABLE.len()];
        for m in self.matcher.find_overlapping_iter(text) {
            let category = self.pattern_categories[m.pattern().as_usize()];
            let slot = BlindSpotCategory::CLASSIFIABLE
                .iter()
                .position(|c| *c == category)
                .expect("classifiable category");
            hits[slot] += 1;
        }

        let (best_slot, best_hits) = hits
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))
            .expect("non-empty category table");
        if *best_hits == 0 {
            return BlindSpotCategory::Unclassified;
        }
        BlindSpotCategory::CLASSIFIABLE[best_slot]
    }
}

pub struct OpenTextDetector;

impl FlagDetector for OpenTextDetector {
    fn id(&self) -> &'static str {
        "open-text"
    }

    fn detect(&self, ctx: &DetectionContext<'_>) -> Vec<Flag> {
        let mut flags = Vec::new();

        for answer in ctx.snapshot.iter() {
            let Some(text) = answer.value.as_text() else {
                continue;
            };
            if text.trim().is_empty() {
                continue;
            }
            let category = ctx.classifier.classify(text);
            if category == BlindSpotCategory::Unclassified {
                continue;
            }

            // Evidence carries the category and identifiers, not the text:
            // respondent-level raw text stays filterable by the outer system.
            flags.push(Flag::new(
                FlagId::BlindSpot,
                Severity::Info,
                FlagEvidence {
                    question_ids: smallvec![answer.question.id.clone()],
                    participant_ids: smallvec![answer.participant_id.to_string()],
                    values: smallvec![category.name().to_string()],
                    detail: format!(
                        "Free-text answer classified as {category} blind spot"
                    ),
                },
            ));
        }

        flags
    }
}
