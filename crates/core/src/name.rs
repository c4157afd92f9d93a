use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// Canonical, case-insensitive resource key.
///
/// The catalog's display names are the source of truth; this is their
/// trimmed, lower-cased form, which is what the parser produces, the
/// resolver matches against and the usage log records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceName(String);

impl ResourceName {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl core::fmt::Display for ResourceName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl ValueObject for ResourceName {}
