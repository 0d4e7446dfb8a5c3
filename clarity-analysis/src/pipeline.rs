//! The evaluation pipeline orchestrator.
//!
//! One call = one pure pass over an immutable snapshot: normalize, score,
//! index, detect, gate, recommend. No state survives between calls, so
//! re-evaluating the same (registry, answers, variant) is byte-identical.

use serde::Serialize;
use tracing::debug;

use clarity_core::config::{ScoringThresholds, VariantConfig};
use clarity_core::errors::{EvaluationError, ValidationDetail};
use clarity_core::registry::QuestionRegistry;
use clarity_core::types::Answer;

use crate::flags::engine::{FlagDiagnostics, FlagEngine};
use crate::flags::types::{Flag, SeverityCounts};
use crate::flags::{DetectionContext, KeywordClassifier, TextClassifier};
use crate::gates::{evaluate_all_gates, GateOutcome};
use crate::index::{compute_index, ClarityIndex};
use crate::recommend::{decide, Recommendation};
use crate::scoring::{score_dimensions, score_process_areas, ProcessScores, ScoreBoard};
use crate::snapshot::AnswerSnapshot;

/// The structured result of one evaluation pass.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResult {
    pub variant: String,
    pub scores: ScoreBoard,
    pub process: ProcessScores,
    pub index: ClarityIndex,
    pub flags: Vec<Flag>,
    pub severity_counts: SeverityCounts,
    pub gates: GateOutcome,
    pub recommendation: Recommendation,
    pub diagnostics: FlagDiagnostics,
}

/// Result plus the non-fatal per-answer problems found along the way.
#[derive(Debug, Serialize)]
pub struct EvaluationOutcome {
    pub result: EvaluationResult,
    pub validation: Vec<ValidationDetail>,
}

impl EvaluationOutcome {
    /// True when every answer passed validation.
    pub fn is_clean(&self) -> bool {
        self.validation.is_empty()
    }
}

/// The pipeline. Holds only configuration; evaluation itself is stateless.
pub struct EvaluationPipeline {
    thresholds: ScoringThresholds,
    engine: FlagEngine,
    classifier: Box<dyn TextClassifier>,
}

impl EvaluationPipeline {
    /// Pipeline with default thresholds and the keyword classifier.
    pub fn new() -> Self {
        Self {
            thresholds: ScoringThresholds::default(),
            engine: FlagEngine::new(),
            classifier: Box::new(KeywordClassifier::new()),
        }
    }

    /// Override the scoring thresholds.
    pub fn with_thresholds(mut self, thresholds: ScoringThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Replace the open-text classifier. The replacement must honor the
    /// bounded contract: one of the seven categories or unclassified.
    pub fn with_classifier(mut self, classifier: Box<dyn TextClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Run one evaluation pass.
    pub fn evaluate(
        &self,
        registry: &QuestionRegistry,
        answers: &[Answer],
        variant: &VariantConfig,
    ) -> Result<EvaluationOutcome, EvaluationError> {
        // Configuration problems are fatal here and never masked below.
        variant.validate()?;
        self.thresholds.validate()?;

        let (snapshot, validation) = AnswerSnapshot::build(registry, answers, variant);
        debug!(
            variant = %variant.name,
            answers = snapshot.len(),
            excluded = validation.len(),
            "snapshot built"
        );

        let scores = score_dimensions(&snapshot, variant);
        let process =
            score_process_areas(&snapshot, variant, scores.case.process_readiness);
        let index = compute_index(&scores.case, variant, &self.thresholds);

        let ctx = DetectionContext {
            snapshot: &snapshot,
            registry,
            thresholds: &self.thresholds,
            classifier: self.classifier.as_ref(),
        };
        let detection = self.engine.run(&ctx);

        let gates = evaluate_all_gates(
            &scores.case,
            &process,
            &detection.flags,
            &snapshot,
            variant,
            &self.thresholds,
        );

        let recommendation = decide(&index, &detection.flags, &gates, variant, &self.thresholds);

        Ok(EvaluationOutcome {
            result: EvaluationResult {
                variant: variant.name.clone(),
                scores,
                process,
                index,
                flags: detection.flags,
                severity_counts: detection.counts,
                gates,
                recommendation,
                diagnostics: detection.diagnostics,
            },
            validation,
        })
    }
}

impl Default for EvaluationPipeline {
    fn default() -> Self {
        Self::new()
    }
}
