//! Append-only usage ledger.
//!
//! Every successful stock mutation is recorded here as an immutable
//! [`UsageEvent`]. The ledger is the historical record the forecasting
//! layer consumes; the catalog's current quantities are the cached "now"
//! view, never the other way around.

pub mod event;
pub mod in_memory;
pub mod store;

pub use event::UsageEvent;
pub use in_memory::InMemoryLedger;
pub use store::{LedgerStore, StoreError};
