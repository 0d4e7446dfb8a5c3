//! Error handling for Clarity.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod evaluation_error;
pub mod normalize_error;
pub mod registry_error;

pub use config_error::ConfigError;
pub use error_code::ClarityErrorCode;
pub use evaluation_error::{EvaluationError, ValidationDetail};
pub use normalize_error::NormalizeError;
pub use registry_error::RegistryError;
