//! Flag engine — runs the eight detectors, deduplicates, severity-sorts.

use rayon::prelude::*;
use serde::Serialize;
use std::fmt;
use tracing::debug;

use clarity_core::types::collections::FxHashSet;

use super::confidence_evidence::ConfidenceEvidenceDetector;
use super::context::DetectionContext;
use super::cross_role::CrossRoleDetector;
use super::open_text::OpenTextDetector;
use super::ownership::OwnershipDetector;
use super::reversed_pair::ReversedPairDetector;
use super::time_consistency::TimeConsistencyDetector;
use super::trade_off::TradeOffDetector;
use super::triad::TriadDetector;
use super::types::{Flag, SeverityCounts};
use super::FlagDetector;

/// Runs all eight detectors over one snapshot.
pub struct FlagEngine {
    detectors: Vec<Box<dyn FlagDetector>>,
}

impl FlagEngine {
    /// Create the engine with the full detector set.
    pub fn new() -> Self {
        let detectors: Vec<Box<dyn FlagDetector>> = vec![
            Box::new(ReversedPairDetector),
            Box::new(TriadDetector),
            Box::new(ConfidenceEvidenceDetector),
            Box::new(CrossRoleDetector),
            Box::new(OwnershipDetector),
            Box::new(TradeOffDetector),
            Box::new(TimeConsistencyDetector),
            Box::new(OpenTextDetector),
        ];
        Self { detectors }
    }

    /// Create an engine with a custom detector set.
    pub fn with_detectors(detectors: Vec<Box<dyn FlagDetector>>) -> Self {
        Self { detectors }
    }

    /// Run every detector and merge the results.
    ///
    /// Detectors are pure and independent, so they run in parallel; the
    /// merged list is deduplicated by (flag id, evidence key) and re-sorted
    /// by (severity, id, evidence key) so the output ordering is
    /// independent of execution order.
    pub fn run(&self, ctx: &DetectionContext<'_>) -> FlagEngineResult {
        let per_detector: Vec<(&'static str, Vec<Flag>)> = self
            .detectors
            .par_iter()
            .map(|detector| (detector.id(), detector.detect(ctx)))
            .collect();

        let raw_count: usize = per_detector.iter().map(|(_, flags)| flags.len()).sum();

        let mut seen = FxHashSet::default();
        let mut flags = Vec::with_capacity(raw_count);
        let mut fires = Vec::with_capacity(per_detector.len());
        for (detector_id, detected) in per_detector {
            let mut kept = 0usize;
            let raw = detected.len();
            for flag in detected {
                if seen.insert(flag.dedup_key()) {
                    kept += 1;
                    flags.push(flag);
                }
            }
            fires.push(DetectorFires {
                detector: detector_id,
                raw,
                kept,
            });
        }

        flags.sort_by(|a, b| {
            a.severity
                .cmp(&b.severity)
                .then_with(|| a.id.name().cmp(b.id.name()))
                .then_with(|| a.evidence.key().cmp(&b.evidence.key()))
        });

        let counts = SeverityCounts::from_flags(&flags);
        let diagnostics = FlagDiagnostics {
            raw_count,
            deduped_count: flags.len(),
            fires,
        };
        debug!(%diagnostics, "flag detection complete");

        FlagEngineResult {
            flags,
            counts,
            diagnostics,
        }
    }
}

impl Default for FlagEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Merged, deduplicated, severity-sorted detection output.
#[derive(Debug, Clone, Serialize)]
pub struct FlagEngineResult {
    pub flags: Vec<Flag>,
    pub counts: SeverityCounts,
    pub diagnostics: FlagDiagnostics,
}

impl FlagEngineResult {
    /// True when any critical flag is present.
    pub fn has_critical(&self) -> bool {
        self.counts.critical > 0
    }
}

/// Per-detector fire counts.
#[derive(Debug, Clone, Serialize)]
pub struct DetectorFires {
    pub detector: &'static str,
    /// Flags the detector emitted.
    pub raw: usize,
    /// Flags surviving deduplication.
    pub kept: usize,
}

/// Engine diagnostics for log lines and audits.
#[derive(Debug, Clone, Serialize)]
pub struct FlagDiagnostics {
    pub raw_count: usize,
    pub deduped_count: usize,
    pub fires: Vec<DetectorFires>,
}

impl fmt::Display for FlagDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FlagDiagnostics {{ raw={}, deduped={}, fired=[",
            self.raw_count, self.deduped_count,
        )?;
        let mut first = true;
        for fire in self.fires.iter().filter(|d| d.raw > 0) {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", fire.detector, fire.kept)?;
            first = false;
        }
        write!(f, "] }}")
    }
}
