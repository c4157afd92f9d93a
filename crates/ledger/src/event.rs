use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use labtrack_core::{Action, Quantity, ResourceName};

/// One recorded stock movement.
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - designed to be **append-only**
/// - ordered by `occurred_at` (business time), which is the order the
///   forecasting layer relies on
///
/// Every event references a resource that existed in the catalog at the
/// time it was logged; the mutator guarantees this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageEvent {
    pub occurred_at: DateTime<Utc>,
    pub action: Action,
    pub resource: ResourceName,
    pub quantity: Quantity,
}

impl UsageEvent {
    pub fn record(
        action: Action,
        resource: ResourceName,
        quantity: Quantity,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            occurred_at,
            action,
            resource,
            quantity,
        }
    }
}
