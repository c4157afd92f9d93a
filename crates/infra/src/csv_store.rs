//! CSV-backed catalog and ledger stores.
//!
//! Schemas are fixed: the catalog file is `Resource,TotalQty,ExpiryDate`
//! and the usage log is `Date,Action,Resource,Qty` with timestamps in
//! `%Y-%m-%d %H:%M:%S`. A missing usage log reads as an empty ledger.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use labtrack_catalog::{Catalog, ResourceRecord};
use labtrack_core::{Action, Quantity, ResourceName};
use labtrack_ledger::{LedgerStore, StoreError, UsageEvent};

use crate::catalog_store::{CatalogStore, CatalogStoreError};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Serialize, Deserialize)]
struct CatalogRow {
    #[serde(rename = "Resource")]
    resource: String,
    #[serde(rename = "TotalQty")]
    total_qty: u64,
    /// Empty string when the resource has no expiry date.
    #[serde(rename = "ExpiryDate")]
    expiry_date: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct LedgerRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Action")]
    action: String,
    #[serde(rename = "Resource")]
    resource: String,
    #[serde(rename = "Qty")]
    qty: u64,
}

/// CSV file holding the whole catalog.
///
/// `save` writes a sibling temp file and renames it over the target, so
/// a crash mid-write never leaves a half-written catalog behind.
#[derive(Debug, Clone)]
pub struct CsvCatalogStore {
    path: PathBuf,
}

impl CsvCatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogStore for CsvCatalogStore {
    fn load(&self) -> Result<Catalog, CatalogStoreError> {
        let file = File::open(&self.path)
            .map_err(|e| CatalogStoreError::Load(format!("{}: {e}", self.path.display())))?;

        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);
        let mut records = Vec::new();
        for row in reader.deserialize::<CatalogRow>() {
            let row = row
                .map_err(|e| CatalogStoreError::Load(format!("{}: {e}", self.path.display())))?;

            let mut record = ResourceRecord::new(row.resource, row.total_qty);
            if !row.expiry_date.trim().is_empty() {
                let date = NaiveDate::parse_from_str(row.expiry_date.trim(), DATE_FORMAT)
                    .map_err(|e| {
                        CatalogStoreError::Load(format!(
                            "{}: bad expiry date '{}': {e}",
                            self.path.display(),
                            row.expiry_date
                        ))
                    })?;
                record = record.with_expiry(date);
            }
            records.push(record);
        }

        Catalog::from_records(records)
            .map_err(|e| CatalogStoreError::Load(format!("{}: {e}", self.path.display())))
    }

    fn save(&self, catalog: &Catalog) -> Result<(), CatalogStoreError> {
        let tmp = self.path.with_extension("csv.tmp");

        let save_err =
            |e: String| CatalogStoreError::Save(format!("{}: {e}", self.path.display()));

        let file = File::create(&tmp).map_err(|e| save_err(e.to_string()))?;
        let mut writer = csv::Writer::from_writer(file);
        for record in catalog.records() {
            writer
                .serialize(CatalogRow {
                    resource: record.name.clone(),
                    total_qty: record.total_quantity,
                    expiry_date: record
                        .expiry_date
                        .map(|d| d.format(DATE_FORMAT).to_string())
                        .unwrap_or_default(),
                })
                .map_err(|e| save_err(e.to_string()))?;
        }
        writer.flush().map_err(|e| save_err(e.to_string()))?;
        drop(writer);

        fs::rename(&tmp, &self.path).map_err(|e| save_err(e.to_string()))
    }
}

/// CSV file holding the append-only usage log.
#[derive(Debug, Clone)]
pub struct CsvLedgerStore {
    path: PathBuf,
}

impl CsvLedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStore for CsvLedgerStore {
    fn append(&self, event: &UsageEvent) -> Result<(), StoreError> {
        let append_err = |e: String| StoreError::Append(format!("{}: {e}", self.path.display()));

        // First append creates the file and writes the header row.
        let write_header = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| append_err(e.to_string()))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        writer
            .serialize(LedgerRow {
                date: event.occurred_at.format(TIMESTAMP_FORMAT).to_string(),
                action: event.action.to_string(),
                resource: event.resource.to_string(),
                qty: event.quantity.get(),
            })
            .map_err(|e| append_err(e.to_string()))?;
        writer.flush().map_err(|e| append_err(e.to_string()))
    }

    fn load(&self) -> Result<Vec<UsageEvent>, StoreError> {
        // No file yet means nothing has been used or returned.
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let load_err = |e: String| StoreError::Load(format!("{}: {e}", self.path.display()));

        let file = File::open(&self.path).map_err(|e| load_err(e.to_string()))?;
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

        let mut events = Vec::new();
        for row in reader.deserialize::<LedgerRow>() {
            let row = row.map_err(|e| load_err(e.to_string()))?;

            let occurred_at = NaiveDateTime::parse_from_str(&row.date, TIMESTAMP_FORMAT)
                .map_err(|e| load_err(format!("bad timestamp '{}': {e}", row.date)))?
                .and_utc();
            let action: Action = row
                .action
                .parse()
                .map_err(|e| load_err(format!("bad action '{}': {e}", row.action)))?;
            let quantity = Quantity::new(row.qty)
                .map_err(|e| load_err(format!("bad quantity '{}': {e}", row.qty)))?;

            events.push(UsageEvent::record(
                action,
                ResourceName::new(&row.resource),
                quantity,
                occurred_at,
            ));
        }

        Ok(events)
    }
}
