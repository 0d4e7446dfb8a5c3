//! Shared vocabulary types for the evaluation pipeline.

pub mod answer;
pub mod collections;
pub mod dimension;
pub mod question;
pub mod role;
pub mod severity;

pub use answer::{Answer, AnswerType, AnswerValue};
pub use dimension::Dimension;
pub use question::{
    ConfidencePart, GateProbe, QuestionDefinition, TimePhase, TradeOffSide, TriadPart,
};
pub use role::Role;
pub use severity::Severity;
