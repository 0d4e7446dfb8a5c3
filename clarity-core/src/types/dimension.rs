//! Evaluation dimensions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Evaluation axes. The first five feed the clarity index; `ProcessReadiness`
/// is gate-only and carries weight 0 in the index formula by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    StrategicIntent,
    ValueEconomics,
    Readiness,
    Risk,
    Governance,
    /// Gate-only axis. Never part of the weighted index.
    ProcessReadiness,
}

impl Dimension {
    /// The five dimensions aggregated into the clarity index, in weight order.
    pub const INDEX: [Dimension; 5] = [
        Dimension::StrategicIntent,
        Dimension::ValueEconomics,
        Dimension::Readiness,
        Dimension::Risk,
        Dimension::Governance,
    ];

    /// All dimensions including the gate-only axis.
    pub const ALL: [Dimension; 6] = [
        Dimension::StrategicIntent,
        Dimension::ValueEconomics,
        Dimension::Readiness,
        Dimension::Risk,
        Dimension::Governance,
        Dimension::ProcessReadiness,
    ];

    /// True for the five index dimensions, false for `ProcessReadiness`.
    pub fn in_index(&self) -> bool {
        !matches!(self, Self::ProcessReadiness)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::StrategicIntent => "strategic_intent",
            Self::ValueEconomics => "value_economics",
            Self::Readiness => "readiness",
            Self::Risk => "risk",
            Self::Governance => "governance",
            Self::ProcessReadiness => "process_readiness",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
