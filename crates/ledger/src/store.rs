use std::sync::Arc;

use thiserror::Error;

use crate::event::UsageEvent;

/// Ledger persistence error.
///
/// These are **infrastructure** failures (IO, encoding, lock poisoning),
/// not domain outcomes. A failed append must leave the ledger exactly as
/// it was.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("ledger append failed: {0}")]
    Append(String),

    #[error("ledger load failed: {0}")]
    Load(String),
}

/// Append-only store for usage events.
///
/// Implementations must:
/// - append atomically (an event is durably recorded or not at all)
/// - never rewrite or drop previously appended events
/// - return events from `load` in append (chronological) order
pub trait LedgerStore: Send + Sync {
    /// Durably record one event.
    fn append(&self, event: &UsageEvent) -> Result<(), StoreError>;

    /// Read back the full ledger, oldest first.
    fn load(&self) -> Result<Vec<UsageEvent>, StoreError>;
}

impl<S> LedgerStore for Arc<S>
where
    S: LedgerStore + ?Sized,
{
    fn append(&self, event: &UsageEvent) -> Result<(), StoreError> {
        (**self).append(event)
    }

    fn load(&self) -> Result<Vec<UsageEvent>, StoreError> {
        (**self).load()
    }
}
