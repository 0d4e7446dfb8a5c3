//! Decision-analysis engine for multi-stakeholder surveys.
//!
//! One evaluation pass is a pure function over an immutable snapshot of
//! (question registry, answer set, variant config): normalize answers,
//! score dimensions per role and per case, compute the clarity index, run
//! the eight contradiction detectors, evaluate the four override gates, and
//! derive the GO / CLARIFY / NO_GO recommendation under strict precedence.
//! No randomness, no I/O, no state between calls.

pub mod flags;
pub mod gates;
pub mod index;
pub mod normalize;
pub mod pipeline;
pub mod recommend;
pub mod scoring;
pub mod snapshot;
pub mod view;

pub use pipeline::{EvaluationOutcome, EvaluationPipeline, EvaluationResult};
pub use view::ResultView;
