use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// What a command does to the stored quantity of a resource.
///
/// The wire names ("use" / "return") are also the action column values in
/// the persisted usage log.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Use,
    Return,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Use => "use",
            Action::Return => "return",
        }
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "use" => Ok(Action::Use),
            "return" => Ok(Action::Return),
            other => Err(DomainError::validation(format!(
                "unknown action '{other}' (expected 'use' or 'return')"
            ))),
        }
    }
}
