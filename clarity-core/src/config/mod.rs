//! Configuration system for Clarity.
//! TOML-based with compiled defaults; validated at load, fatal on error.

pub mod thresholds;
pub mod variant;

pub use thresholds::ScoringThresholds;
pub use variant::{EngineConfig, VariantConfig};
