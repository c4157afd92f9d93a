//! In-memory ledger for tests/dev.

use std::sync::RwLock;

use crate::event::UsageEvent;
use crate::store::{LedgerStore, StoreError};

/// In-memory append-only ledger.
///
/// Intended for tests/dev. Not durable.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    events: RwLock<Vec<UsageEvent>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LedgerStore for InMemoryLedger {
    fn append(&self, event: &UsageEvent) -> Result<(), StoreError> {
        let mut events = self
            .events
            .write()
            .map_err(|_| StoreError::Append("lock poisoned".to_string()))?;
        events.push(event.clone());
        Ok(())
    }

    fn load(&self) -> Result<Vec<UsageEvent>, StoreError> {
        let events = self
            .events
            .read()
            .map_err(|_| StoreError::Load("lock poisoned".to_string()))?;
        Ok(events.clone())
    }
}
