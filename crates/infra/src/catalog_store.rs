use std::sync::{Arc, RwLock};

use thiserror::Error;

use labtrack_catalog::Catalog;

/// Catalog persistence error (infrastructure, not domain).
#[derive(Debug, Error)]
pub enum CatalogStoreError {
    #[error("catalog load failed: {0}")]
    Load(String),

    #[error("catalog save failed: {0}")]
    Save(String),
}

/// Whole-catalog persistence.
///
/// The catalog is small (one row per tracked resource), so the store
/// reads and writes it as a unit; there is no per-record API. A failed
/// `save` must leave the previously stored catalog intact.
pub trait CatalogStore: Send + Sync {
    fn load(&self) -> Result<Catalog, CatalogStoreError>;
    fn save(&self, catalog: &Catalog) -> Result<(), CatalogStoreError>;
}

impl<S> CatalogStore for Arc<S>
where
    S: CatalogStore + ?Sized,
{
    fn load(&self) -> Result<Catalog, CatalogStoreError> {
        (**self).load()
    }

    fn save(&self, catalog: &Catalog) -> Result<(), CatalogStoreError> {
        (**self).save(catalog)
    }
}

/// In-memory catalog store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    inner: RwLock<Catalog>,
}

impl InMemoryCatalogStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            inner: RwLock::new(catalog),
        }
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn load(&self) -> Result<Catalog, CatalogStoreError> {
        self.inner
            .read()
            .map(|c| c.clone())
            .map_err(|_| CatalogStoreError::Load("lock poisoned".to_string()))
    }

    fn save(&self, catalog: &Catalog) -> Result<(), CatalogStoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| CatalogStoreError::Save("lock poisoned".to_string()))?;
        *inner = catalog.clone();
        Ok(())
    }
}
