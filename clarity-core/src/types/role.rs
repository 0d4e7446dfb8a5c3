//! Stakeholder roles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of stakeholder roles a question can be addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Sponsoring executive — strategic intent and mandate.
    Executive,
    /// Finance / controlling — value economics.
    Finance,
    /// Operations — process ownership and day-to-day execution.
    Operations,
    /// Technology / IT — systems, data, integration.
    Technology,
    /// End users affected by the change.
    EndUser,
}

impl Role {
    /// All roles, in canonical order.
    pub const ALL: [Role; 5] = [
        Role::Executive,
        Role::Finance,
        Role::Operations,
        Role::Technology,
        Role::EndUser,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Executive => "executive",
            Self::Finance => "finance",
            Self::Operations => "operations",
            Self::Technology => "technology",
            Self::EndUser => "end_user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
