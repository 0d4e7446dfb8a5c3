//! Flag severity levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a detected contradiction flag.
///
/// Ordering is significant: `Critical < Warn < Info`, so an ascending sort
/// puts critical flags first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Critical,
    Warn,
    Info,
}

impl Severity {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warn => "warn",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
