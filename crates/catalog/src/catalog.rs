use labtrack_core::{DomainError, DomainResult, ResourceName};

use crate::record::ResourceRecord;

/// Insertion-ordered table of all tracked resources.
///
/// The catalog is the single source of truth for valid resource names.
/// Iteration order is insertion order, which fixes the resolver's
/// tie-breaking and keeps behavior reproducible across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<ResourceRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from records, rejecting case-insensitive
    /// duplicate names.
    pub fn from_records(records: Vec<ResourceRecord>) -> DomainResult<Self> {
        let mut catalog = Self::new();
        for record in records {
            catalog.insert(record)?;
        }
        Ok(catalog)
    }

    /// Add a new resource. The name must not collide with an existing
    /// record (case-insensitively).
    pub fn insert(&mut self, record: ResourceRecord) -> DomainResult<()> {
        if record.key().is_empty() {
            return Err(DomainError::validation("resource name cannot be empty"));
        }
        if self.lookup(&record.key()).is_some() {
            return Err(DomainError::invariant(format!(
                "duplicate resource name '{}'",
                record.key()
            )));
        }
        self.records.push(record);
        Ok(())
    }

    /// Case-insensitive exact lookup.
    pub fn lookup(&self, name: &ResourceName) -> Option<&ResourceRecord> {
        self.records.iter().find(|r| &r.key() == name)
    }

    pub(crate) fn lookup_mut(&mut self, name: &ResourceName) -> Option<&mut ResourceRecord> {
        self.records.iter_mut().find(|r| &r.key() == name)
    }

    /// Canonical names in insertion order (the resolver's search space).
    pub fn names(&self) -> Vec<ResourceName> {
        self.records.iter().map(ResourceRecord::key).collect()
    }

    pub fn records(&self) -> &[ResourceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
