//! The immutable answer snapshot one evaluation pass works on.
//!
//! Joins every answer with its question definition and pre-normalizes
//! Likert values, once. Invalid answers (bad Likert domain, wrong value
//! shape, unknown question id) are excluded and reported as validation
//! details — the evaluation itself never aborts over per-answer data.

use clarity_core::config::VariantConfig;
use clarity_core::errors::{NormalizeError, ValidationDetail};
use clarity_core::registry::QuestionRegistry;
use clarity_core::types::collections::FxHashMap;
use clarity_core::types::{Answer, AnswerValue, QuestionDefinition, Role};

use crate::normalize::{self, NormalizedScore};

/// One answer joined with its definition, normalized where applicable.
#[derive(Debug, Clone)]
pub struct ScoredAnswer<'a> {
    pub question: &'a QuestionDefinition,
    pub participant_id: &'a str,
    pub role: Role,
    pub value: &'a AnswerValue,
    /// Present only for valid Likert answers.
    pub normalized: Option<NormalizedScore>,
}

/// The joined, validated view over one assessment's answers.
pub struct AnswerSnapshot<'a> {
    answers: Vec<ScoredAnswer<'a>>,
    by_question: FxHashMap<&'a str, Vec<usize>>,
}

impl<'a> AnswerSnapshot<'a> {
    /// Build the snapshot for one variant.
    ///
    /// Answers from roles outside the variant's active set are dropped
    /// silently (they belong to a different assessment scope); structurally
    /// invalid answers are dropped with a [`ValidationDetail`].
    pub fn build(
        registry: &'a QuestionRegistry,
        raw_answers: &'a [Answer],
        variant: &VariantConfig,
    ) -> (Self, Vec<ValidationDetail>) {
        let mut answers = Vec::with_capacity(raw_answers.len());
        let mut by_question: FxHashMap<&str, Vec<usize>> = FxHashMap::default();
        let mut validation = Vec::new();

        for answer in raw_answers {
            let Some(question) = registry.get(&answer.question_id) else {
                validation.push(ValidationDetail::unknown_question(
                    &answer.question_id,
                    &answer.participant_id,
                ));
                continue;
            };
            if !variant.active_roles.contains(&answer.role) {
                continue;
            }
            if !answer.value.matches(question.answer_type) {
                validation.push(ValidationDetail::from_normalize(
                    &answer.participant_id,
                    &NormalizeError::TypeMismatch {
                        question_id: question.id.clone(),
                        expected: match question.answer_type {
                            clarity_core::types::AnswerType::Likert => "likert",
                            clarity_core::types::AnswerType::SingleSelect => "single_select",
                            clarity_core::types::AnswerType::MultiSelect => "multi_select",
                            clarity_core::types::AnswerType::FreeText => "free_text",
                        },
                    },
                ));
                continue;
            }

            let normalized = match answer.value.as_likert() {
                Some(raw) => {
                    match normalize::normalize(&question.id, f64::from(raw), question.is_reverse)
                    {
                        Ok(n) => Some(n),
                        Err(err) => {
                            validation
                                .push(ValidationDetail::from_normalize(&answer.participant_id, &err));
                            continue;
                        }
                    }
                }
                None => None,
            };

            let idx = answers.len();
            answers.push(ScoredAnswer {
                question,
                participant_id: &answer.participant_id,
                role: answer.role,
                value: &answer.value,
                normalized,
            });
            by_question.entry(&question.id).or_default().push(idx);
        }

        (
            Self {
                answers,
                by_question,
            },
            validation,
        )
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoredAnswer<'a>> {
        self.answers.iter()
    }

    /// All answers to one question, in submission order.
    pub fn for_question(&self, question_id: &str) -> impl Iterator<Item = &ScoredAnswer<'a>> {
        self.by_question
            .get(question_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|&idx| &self.answers[idx])
    }

    /// The answer to a question from one specific participant.
    pub fn for_participant(
        &self,
        question_id: &str,
        participant_id: &str,
    ) -> Option<&ScoredAnswer<'a>> {
        self.for_question(question_id)
            .find(|a| a.participant_id == participant_id)
    }

    /// Deterministic single answer for a question: the participant-sorted
    /// first one. Used where a detector needs one representative answer and
    /// the question is not participant-correlated.
    pub fn first_answer(&self, question_id: &str) -> Option<&ScoredAnswer<'a>> {
        self.for_question(question_id)
            .min_by_key(|a| a.participant_id)
    }
}
