use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// A strictly positive amount of a resource.
///
/// Commands and usage events always move a positive quantity; zero-unit
/// moves are rejected at construction so downstream code never has to
/// special-case them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u64);

impl Quantity {
    pub fn new(amount: u64) -> DomainResult<Self> {
        if amount == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        Ok(Self(amount))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl ValueObject for Quantity {}
