//! Dimension and process scoring.

pub mod dimension;
pub mod process;
pub mod types;

pub use dimension::score_dimensions;
pub use process::{score_process_areas, ProcessScores};
pub use types::{DimensionScoreSet, RoleScores, ScoreBoard};
