//! Core types, errors, configuration, and the question registry for the
//! Clarity decision-analysis engine.
//!
//! This crate carries no algorithmic code: scoring, flag detection, gates,
//! and the recommendation rule live in `clarity-analysis`. Everything here
//! is the shared vocabulary — immutable question definitions, the answer
//! tagged union, variant configuration with load-time validation, and one
//! error enum per subsystem.

pub mod config;
pub mod errors;
pub mod registry;
pub mod tracing_setup;
pub mod types;
