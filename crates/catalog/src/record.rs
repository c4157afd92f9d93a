use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use labtrack_core::ResourceName;

/// Current state of one tracked resource.
///
/// `name` is the display form shown to users; uniqueness and lookup are
/// case-insensitive via [`ResourceRecord::key`]. `total_quantity` never
/// goes negative; the mutator enforces this before any change is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub name: String,
    pub total_quantity: u64,
    pub expiry_date: Option<NaiveDate>,
}

impl ResourceRecord {
    pub fn new(name: impl Into<String>, total_quantity: u64) -> Self {
        Self {
            name: name.into(),
            total_quantity,
            expiry_date: None,
        }
    }

    pub fn with_expiry(mut self, date: NaiveDate) -> Self {
        self.expiry_date = Some(date);
        self
    }

    /// Canonical case-insensitive key for this record.
    pub fn key(&self) -> ResourceName {
        ResourceName::new(&self.name)
    }
}
