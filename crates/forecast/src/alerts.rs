//! Restocking and expiry alert rules.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use labtrack_catalog::Catalog;

/// Quantity below which a resource needs restocking.
pub const RESTOCK_THRESHOLD: u64 = 10;

/// How far ahead expiry monitoring looks, in days.
pub const EXPIRY_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestockAlert {
    pub resource: String,
    pub total_quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpiryAlert {
    pub resource: String,
    pub expiry_date: NaiveDate,
}

/// Resources whose quantity is strictly below `threshold`, in catalog
/// order.
pub fn restock_alerts(catalog: &Catalog, threshold: u64) -> Vec<RestockAlert> {
    catalog
        .records()
        .iter()
        .filter(|r| r.total_quantity < threshold)
        .map(|r| RestockAlert {
            resource: r.name.clone(),
            total_quantity: r.total_quantity,
        })
        .collect()
}

/// Resources expiring after `today` but within `window_days`, soonest
/// first.
///
/// Already-expired stock is excluded; it is a disposal problem, not a
/// restocking one.
pub fn expiry_alerts(catalog: &Catalog, today: NaiveDate, window_days: i64) -> Vec<ExpiryAlert> {
    let horizon = today + Duration::days(window_days);

    let mut alerts: Vec<ExpiryAlert> = catalog
        .records()
        .iter()
        .filter_map(|r| {
            let expiry = r.expiry_date?;
            (expiry > today && expiry <= horizon).then(|| ExpiryAlert {
                resource: r.name.clone(),
                expiry_date: expiry,
            })
        })
        .collect();

    alerts.sort_by_key(|a| a.expiry_date);
    alerts
}
