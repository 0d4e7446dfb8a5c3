//! Shared read-only context handed to every detector.

use clarity_core::config::ScoringThresholds;
use clarity_core::registry::QuestionRegistry;

use crate::snapshot::AnswerSnapshot;

use super::open_text::TextClassifier;

/// Everything a detector may read. Immutable for the duration of one
/// evaluation pass, so detectors can run concurrently without coordination.
pub struct DetectionContext<'a> {
    pub snapshot: &'a AnswerSnapshot<'a>,
    pub registry: &'a QuestionRegistry,
    pub thresholds: &'a ScoringThresholds,
    pub classifier: &'a dyn TextClassifier,
}
