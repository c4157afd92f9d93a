//! Integration tests for the full command pipeline.
//!
//! Tests: raw text → parser → resolver → catalog decide/apply →
//! catalog store + ledger store → response string.
//!
//! Verifies:
//! - The fixed response strings for every outcome
//! - Catalog and ledger stay consistent, including under store failures
//! - Invalid commands change nothing, no matter how often they repeat

use std::sync::Arc;

use labtrack_catalog::{Catalog, ResourceRecord};
use labtrack_core::{Action, Quantity, ResourceName};
use labtrack_ledger::{InMemoryLedger, LedgerStore, StoreError, UsageEvent};

use crate::catalog_store::{CatalogStore, InMemoryCatalogStore};
use crate::orchestrator::{CommandOrchestrator, OrchestratorError};

fn catalog_with(entries: &[(&str, u64)]) -> Catalog {
    Catalog::from_records(
        entries
            .iter()
            .map(|(name, qty)| ResourceRecord::new(*name, *qty))
            .collect(),
    )
    .unwrap()
}

type TestOrchestrator = CommandOrchestrator<Arc<InMemoryCatalogStore>, Arc<InMemoryLedger>>;

fn setup(entries: &[(&str, u64)]) -> (TestOrchestrator, Arc<InMemoryCatalogStore>, Arc<InMemoryLedger>) {
    let store = Arc::new(InMemoryCatalogStore::new(catalog_with(entries)));
    let ledger = Arc::new(InMemoryLedger::new());
    let orchestrator = CommandOrchestrator::open(store.clone(), ledger.clone()).unwrap();
    (orchestrator, store, ledger)
}

fn stored_quantity(store: &InMemoryCatalogStore, name: &str) -> u64 {
    store
        .load()
        .unwrap()
        .lookup(&ResourceName::new(name))
        .unwrap()
        .total_quantity
}

#[test]
fn use_command_updates_catalog_and_appends_one_event() {
    let (mut orchestrator, store, ledger) = setup(&[("Ethanol", 50)]);

    let response = orchestrator.handle("use 10 units of ethanol").unwrap();

    assert_eq!(response, "10 units of ethanol used from inventory.");
    assert_eq!(stored_quantity(&store, "ethanol"), 40);

    let events = ledger.load().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action, Action::Use);
    assert_eq!(events[0].resource, ResourceName::new("ethanol"));
    assert_eq!(events[0].quantity.get(), 10);
}

#[test]
fn insufficient_stock_changes_nothing() {
    let (mut orchestrator, store, ledger) = setup(&[("Ethanol", 5)]);

    let response = orchestrator.handle("use 10 units of ethanol").unwrap();

    assert_eq!(response, "Not enough ethanol in inventory.");
    assert_eq!(stored_quantity(&store, "ethanol"), 5);
    assert!(ledger.is_empty());
}

#[test]
fn typo_is_resolved_before_mutation() {
    let (mut orchestrator, store, _ledger) = setup(&[("Ethanol", 50)]);

    let response = orchestrator.handle("use 10 units of ethnol").unwrap();

    assert_eq!(response, "10 units of ethanol used from inventory.");
    assert_eq!(stored_quantity(&store, "ethanol"), 40);
}

#[test]
fn invalid_text_is_rejected_without_side_effects_every_time() {
    let (mut orchestrator, store, ledger) = setup(&[("Ethanol", 50)]);
    let before = store.load().unwrap();

    for _ in 0..2 {
        let response = orchestrator.handle("please do something").unwrap();
        assert_eq!(response, "Invalid command format.");
    }

    assert_eq!(store.load().unwrap(), before);
    assert!(ledger.is_empty());
}

#[test]
fn return_command_increments_stock() {
    let (mut orchestrator, store, ledger) = setup(&[("Gloves", 3)]);

    let response = orchestrator.handle("return 7 pairs of gloves").unwrap();

    assert_eq!(response, "7 units of gloves returned to inventory.");
    assert_eq!(stored_quantity(&store, "gloves"), 10);
    assert_eq!(ledger.load().unwrap()[0].action, Action::Return);
}

#[test]
fn unmatched_resource_reports_not_found() {
    let (mut orchestrator, _store, ledger) = setup(&[("Ethanol", 50), ("Gloves", 3)]);

    let response = orchestrator.handle("use 1 of beaker").unwrap();

    assert_eq!(response, "beaker not found in inventory.");
    assert!(ledger.is_empty());
}

#[test]
fn use_boundary_is_exact() {
    let (mut orchestrator, store, _ledger) = setup(&[("Ethanol", 5)]);

    let response = orchestrator.handle("use 6 units of ethanol").unwrap();
    assert_eq!(response, "Not enough ethanol in inventory.");
    assert_eq!(stored_quantity(&store, "ethanol"), 5);

    let response = orchestrator.handle("use 5 units of ethanol").unwrap();
    assert_eq!(response, "5 units of ethanol used from inventory.");
    assert_eq!(stored_quantity(&store, "ethanol"), 0);
}

#[test]
fn conservation_over_a_command_sequence() {
    let (mut orchestrator, store, ledger) = setup(&[("Ethanol", 50)]);

    orchestrator.handle("use 20 units of ethanol").unwrap();
    orchestrator.handle("return 5 units of ethanol").unwrap();
    orchestrator.handle("use 10 units of ethanol").unwrap();

    // 50 - 20 + 5 - 10
    assert_eq!(stored_quantity(&store, "ethanol"), 25);
    assert_eq!(ledger.len(), 3);
}

#[test]
fn transcriber_failure_strings_fail_the_grammar_like_any_text() {
    let (mut orchestrator, _store, ledger) = setup(&[("Ethanol", 50)]);

    let response = orchestrator
        .handle("Sorry, could not understand the audio")
        .unwrap();

    assert_eq!(response, "Invalid command format.");
    assert!(ledger.is_empty());
}

/// Ledger stub whose appends always fail.
#[derive(Debug, Default)]
struct FailingLedger;

impl LedgerStore for FailingLedger {
    fn append(&self, _event: &UsageEvent) -> Result<(), StoreError> {
        Err(StoreError::Append("disk full".to_string()))
    }

    fn load(&self) -> Result<Vec<UsageEvent>, StoreError> {
        Ok(Vec::new())
    }
}

#[test]
fn failed_ledger_append_rolls_the_catalog_back() {
    let store = Arc::new(InMemoryCatalogStore::new(catalog_with(&[("Ethanol", 50)])));
    let mut orchestrator = CommandOrchestrator::open(store.clone(), FailingLedger).unwrap();

    let err = orchestrator.handle("use 10 units of ethanol").unwrap_err();

    assert!(matches!(err, OrchestratorError::LedgerPersistence(_)));
    // Store and cached state both still show the original quantity.
    assert_eq!(stored_quantity(&store, "ethanol"), 50);
    assert_eq!(
        orchestrator
            .catalog()
            .lookup(&ResourceName::new("ethanol"))
            .unwrap()
            .total_quantity,
        50
    );

    // The orchestrator keeps processing commands afterwards.
    let response = orchestrator.handle("use 60 units of ethanol").unwrap();
    assert_eq!(response, "Not enough ethanol in inventory.");
}

#[test]
fn successful_mutations_round_trip_through_the_ledger() {
    let (mut orchestrator, _store, ledger) = setup(&[("Ethanol", 50)]);

    orchestrator.handle("use 10 units of ethanol").unwrap();
    let first = ledger.load().unwrap();
    let second = ledger.load().unwrap();

    assert_eq!(first, second);
    assert_eq!(
        (first[0].action, first[0].quantity),
        (Action::Use, Quantity::new(10).unwrap())
    );
}
