//! Normalization errors.

use super::error_code::{self, ClarityErrorCode};

/// Errors raised while normalizing a single answer.
///
/// Fatal for that answer only: the pipeline excludes it from aggregation
/// and reports the condition as a validation detail, never as a pipeline
/// failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NormalizeError {
    #[error("Invalid Likert value {value} for question {question_id}: expected integer 1..=5")]
    InvalidLikertValue { question_id: String, value: u8 },

    #[error("Answer to {question_id} has wrong shape for declared type {expected}")]
    TypeMismatch {
        question_id: String,
        expected: &'static str,
    },
}

impl ClarityErrorCode for NormalizeError {
    fn error_code(&self) -> &'static str {
        error_code::NORMALIZE_ERROR
    }
}
