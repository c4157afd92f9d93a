//! Resource catalog: the authoritative current-quantity table.
//!
//! Business rules are deterministic domain logic (no IO, no storage):
//! deciding whether a mutation is valid is separate from applying it, so
//! callers can persist the resulting event before evolving cached state.

pub mod catalog;
pub mod mutation;
pub mod record;

pub use catalog::Catalog;
pub use mutation::StockMutation;
pub use record::ResourceRecord;
