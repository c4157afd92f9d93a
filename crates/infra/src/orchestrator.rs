//! One-command orchestration pipeline.
//!
//! ```text
//! raw text
//!   ↓ parse          (pure; failure → "Invalid command format.")
//!   ↓ resolve        (pure; below-cutoff tokens pass through unchanged)
//!   ↓ decide         (catalog validation, no mutation yet)
//!   ↓ commit         (catalog save + ledger append as one logical unit)
//!   ↓ respond        (fixed human-readable strings)
//! ```
//!
//! The orchestrator is the only component that triggers persistence.
//! Each command runs to completion before the next is accepted; there is
//! no session state between commands.

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use labtrack_catalog::{Catalog, StockMutation};
use labtrack_command::{CommandParser, NameResolver};
use labtrack_core::{Action, DomainError};
use labtrack_ledger::{LedgerStore, StoreError, UsageEvent};

use crate::catalog_store::{CatalogStore, CatalogStoreError};

/// Fixed response for text that does not match the command grammar.
pub const RESPONSE_INVALID: &str = "Invalid command format.";

/// Persistence failed for one command.
///
/// Domain outcomes (unknown resource, insufficient stock, bad grammar)
/// are not errors: they map to fixed response strings. This enum only
/// covers the case where the stores could not durably record a valid
/// command; the orchestrator itself stays usable afterwards.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// The catalog write failed; nothing was applied anywhere.
    #[error("catalog persistence failed: {0}")]
    CatalogPersistence(#[source] CatalogStoreError),

    /// The ledger append failed; the catalog write was rolled back.
    #[error("ledger persistence failed, catalog rolled back: {0}")]
    LedgerPersistence(#[source] StoreError),

    /// The ledger append failed and rolling the catalog back failed
    /// too: the two stores may disagree until the next successful save.
    #[error("ledger append failed ({append}) and catalog rollback failed ({rollback})")]
    RollbackFailed {
        append: StoreError,
        rollback: CatalogStoreError,
    },
}

/// Composes parser, resolver, catalog and the two stores into the single
/// entry point for typed or transcribed commands.
#[derive(Debug)]
pub struct CommandOrchestrator<C, L> {
    parser: CommandParser,
    resolver: NameResolver,
    catalog: Catalog,
    catalog_store: C,
    ledger: L,
}

impl<C, L> CommandOrchestrator<C, L>
where
    C: CatalogStore,
    L: LedgerStore,
{
    /// Load the catalog from its store and wire up the pipeline.
    pub fn open(catalog_store: C, ledger: L) -> Result<Self, CatalogStoreError> {
        let catalog = catalog_store.load()?;
        Ok(Self {
            parser: CommandParser::new(),
            resolver: NameResolver::new(),
            catalog,
            catalog_store,
            ledger,
        })
    }

    /// Replace the default resolver (e.g. a different cutoff).
    pub fn with_resolver(mut self, resolver: NameResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Current cached catalog state.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Process one command to completion.
    ///
    /// `text` is any string: typed input or a transcription, including a
    /// transcriber's own failure messages, which simply fail the grammar.
    /// Returns the human-readable response; `Err` only for persistence
    /// failures, after which the orchestrator remains usable.
    pub fn handle(&mut self, text: &str) -> Result<String, OrchestratorError> {
        let command_id = Uuid::now_v7();
        let span = tracing::info_span!("command", %command_id);
        let _guard = span.enter();

        let parsed = match self.parser.parse(text) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::debug!(%err, "rejected command text");
                return Ok(RESPONSE_INVALID.to_string());
            }
        };

        let resolved = self
            .resolver
            .resolve(&parsed.resource_token, &self.catalog.names());
        let mutation = StockMutation::new(parsed.action, parsed.quantity, resolved, Utc::now());

        let event = match self.catalog.decide(&mutation) {
            Ok(event) => event,
            Err(DomainError::NotFound(name)) => {
                return Ok(format!("{name} not found in inventory."));
            }
            Err(DomainError::InsufficientStock { resource, .. }) => {
                return Ok(format!("Not enough {resource} in inventory."));
            }
            Err(err) => {
                tracing::warn!(%err, "unexpected domain error from decide");
                return Ok(RESPONSE_INVALID.to_string());
            }
        };

        self.commit(&event)?;

        tracing::info!(
            action = %event.action,
            resource = %event.resource,
            quantity = %event.quantity,
            "recorded stock movement"
        );

        Ok(match event.action {
            Action::Use => format!(
                "{} units of {} used from inventory.",
                event.quantity, event.resource
            ),
            Action::Return => format!(
                "{} units of {} returned to inventory.",
                event.quantity, event.resource
            ),
        })
    }

    /// Persist one event's catalog update and ledger append as a unit.
    ///
    /// The catalog file is written first; if the ledger append then
    /// fails, the previous catalog is written back. In-memory state
    /// advances only after both writes succeed, so a later command never
    /// observes a half-applied mutation.
    fn commit(&mut self, event: &UsageEvent) -> Result<(), OrchestratorError> {
        let mut updated = self.catalog.clone();
        updated.apply(event);

        self.catalog_store
            .save(&updated)
            .map_err(OrchestratorError::CatalogPersistence)?;

        if let Err(append) = self.ledger.append(event) {
            return match self.catalog_store.save(&self.catalog) {
                Ok(()) => Err(OrchestratorError::LedgerPersistence(append)),
                Err(rollback) => Err(OrchestratorError::RollbackFailed { append, rollback }),
            };
        }

        self.catalog = updated;
        Ok(())
    }
}
