//! Question registry errors.

use super::error_code::{self, ClarityErrorCode};

/// Errors raised while building the question registry at startup.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Duplicate question id: {0}")]
    DuplicateQuestionId(String),

    #[error("Question {id}: {part} tag requires the {group} group tag")]
    DanglingGroupTag {
        id: String,
        part: &'static str,
        group: &'static str,
    },
}

impl ClarityErrorCode for RegistryError {
    fn error_code(&self) -> &'static str {
        error_code::REGISTRY_ERROR
    }
}
