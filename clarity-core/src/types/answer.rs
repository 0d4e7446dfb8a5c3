//! Answers and the answer-value tagged union.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::role::Role;

/// Declared answer type of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerType {
    /// 1–5 agreement scale.
    Likert,
    /// One option from a fixed list.
    SingleSelect,
    /// Zero or more options from a fixed list.
    MultiSelect,
    /// Free text, classified downstream into blind-spot categories.
    FreeText,
}

/// A raw answer value, keyed by the question's declared [`AnswerType`].
///
/// The shape is checked once at ingestion via [`AnswerValue::matches`];
/// downstream code matches on the variant and never re-inspects types
/// ad hoc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AnswerValue {
    Likert(u8),
    Selection(String),
    Selections(Vec<String>),
    Text(String),
}

impl AnswerValue {
    /// Whether this value's shape matches the declared answer type.
    pub fn matches(&self, answer_type: AnswerType) -> bool {
        matches!(
            (self, answer_type),
            (Self::Likert(_), AnswerType::Likert)
                | (Self::Selection(_), AnswerType::SingleSelect)
                | (Self::Selections(_), AnswerType::MultiSelect)
                | (Self::Text(_), AnswerType::FreeText)
        )
    }

    /// The Likert raw value, if this is a Likert answer.
    pub fn as_likert(&self) -> Option<u8> {
        match self {
            Self::Likert(v) => Some(*v),
            _ => None,
        }
    }

    /// The selected option, if this is a single-select answer.
    pub fn as_selection(&self) -> Option<&str> {
        match self {
            Self::Selection(s) => Some(s),
            _ => None,
        }
    }

    /// The free text, if this is a text answer.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Likert(v) => write!(f, "{v}"),
            Self::Selection(s) => f.write_str(s),
            Self::Selections(ss) => f.write_str(&ss.join(", ")),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One recorded answer from one participant.
///
/// Answers are immutable once recorded; the storage layer upserts by
/// (participant, question) before the evaluation snapshot is taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: String,
    pub participant_id: String,
    pub role: Role,
    pub value: AnswerValue,
}

impl Answer {
    pub fn new(
        question_id: impl Into<String>,
        participant_id: impl Into<String>,
        role: Role,
        value: AnswerValue,
    ) -> Self {
        Self {
            question_id: question_id.into(),
            participant_id: participant_id.into(),
            role,
            value,
        }
    }
}
