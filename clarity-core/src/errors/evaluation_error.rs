//! Evaluation errors and non-fatal validation detail collection.

use serde::Serialize;

use super::config_error::ConfigError;
use super::error_code::ClarityErrorCode;
use super::normalize_error::NormalizeError;
use super::registry_error::RegistryError;

/// Errors that can abort an evaluation pass.
/// Aggregates subsystem errors via `From` conversions.
///
/// Per-answer problems (invalid Likert values, type mismatches, answers to
/// unknown questions) do NOT appear here — those are collected as
/// [`ValidationDetail`] records alongside the result.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

impl ClarityErrorCode for EvaluationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Registry(e) => e.error_code(),
        }
    }
}

/// A non-fatal per-answer problem recorded during evaluation.
///
/// The offending answer is excluded from aggregation; the evaluation
/// continues and reports these upward as data-quality diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationDetail {
    pub question_id: String,
    pub participant_id: String,
    pub message: String,
}

impl ValidationDetail {
    pub fn unknown_question(question_id: &str, participant_id: &str) -> Self {
        Self {
            question_id: question_id.to_string(),
            participant_id: participant_id.to_string(),
            message: format!("Answer references unknown question id {question_id}"),
        }
    }

    pub fn from_normalize(participant_id: &str, err: &NormalizeError) -> Self {
        let question_id = match err {
            NormalizeError::InvalidLikertValue { question_id, .. } => question_id.clone(),
            NormalizeError::TypeMismatch { question_id, .. } => question_id.clone(),
        };
        Self {
            question_id,
            participant_id: participant_id.to_string(),
            message: err.to_string(),
        }
    }
}
