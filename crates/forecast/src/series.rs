//! Per-resource usage series extracted from the ledger.

use chrono::NaiveDate;

use labtrack_core::{Action, ResourceName};
use labtrack_ledger::UsageEvent;

/// Distinct dated observations required before forecasting makes sense.
pub const MIN_DISTINCT_DATES: usize = 2;

/// One dated consumption observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsagePoint {
    pub date: NaiveDate,
    pub quantity: u64,
}

/// Chronological USE observations for one resource.
///
/// RETURN events do not contribute to demand and are skipped. The result
/// is ordered by event time regardless of the store's iteration order;
/// events sharing a timestamp keep their append order.
pub fn usage_series(events: &[UsageEvent], resource: &ResourceName) -> Vec<UsagePoint> {
    let mut relevant: Vec<&UsageEvent> = events
        .iter()
        .filter(|e| e.action == Action::Use && &e.resource == resource)
        .collect();
    relevant.sort_by_key(|e| e.occurred_at);

    relevant
        .into_iter()
        .map(|e| UsagePoint {
            date: e.occurred_at.date_naive(),
            quantity: e.quantity.get(),
        })
        .collect()
}

/// Count distinct observation dates in a chronological series.
pub fn distinct_dates(points: &[UsagePoint]) -> usize {
    let mut count = 0;
    let mut last: Option<NaiveDate> = None;
    for point in points {
        if last != Some(point.date) {
            count += 1;
            last = Some(point.date);
        }
    }
    count
}

/// Resources that have at least one USE event, in order of first use.
pub fn resources_with_usage(events: &[UsageEvent]) -> Vec<ResourceName> {
    let mut seen: Vec<ResourceName> = Vec::new();
    for event in events {
        if event.action == Action::Use && !seen.contains(&event.resource) {
            seen.push(event.resource.clone());
        }
    }
    seen
}
