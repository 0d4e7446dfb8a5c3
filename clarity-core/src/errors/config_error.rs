//! Configuration errors — fatal at load time, never tolerated downstream.

use super::error_code::{self, ClarityErrorCode};

/// Errors raised while loading or validating variant configuration.
///
/// Any of these corrupts every downstream score, so they abort startup;
/// the evaluation pipeline never catches them.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {message}")]
    ParseError { message: String },

    #[error("Variant {variant}: role weights sum to {sum}, expected 1.0")]
    RoleWeightSum { variant: String, sum: f64 },

    #[error("Variant {variant}: index weights sum to {sum}, expected 1.0")]
    IndexWeightSum { variant: String, sum: f64 },

    #[error("Variant {variant}: weight assigned to inactive role {role}")]
    WeightForInactiveRole { variant: String, role: String },

    #[error("Variant {variant}: gate-only dimension carries index weight {weight}")]
    GateOnlyDimensionWeighted { variant: String, weight: f64 },

    #[error("Variant {variant}: process gate enabled but process dimension inactive")]
    ProcessGateWithoutDimension { variant: String },

    #[error("Invalid threshold {name}: {value}")]
    InvalidThreshold { name: String, value: f64 },
}

impl ClarityErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
