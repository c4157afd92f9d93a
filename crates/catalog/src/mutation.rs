//! The inventory mutator: decide, then apply.

use chrono::{DateTime, Utc};

use labtrack_core::{Action, DomainError, DomainResult, Quantity, ResourceName};
use labtrack_ledger::UsageEvent;

use crate::catalog::Catalog;

/// A resolved, validated-shape command against the catalog.
///
/// The resource name has already been through the resolver; `decide`
/// checks it against the catalog and either rejects the mutation or
/// returns the single event describing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockMutation {
    pub action: Action,
    pub quantity: Quantity,
    pub resource: ResourceName,
    pub occurred_at: DateTime<Utc>,
}

impl StockMutation {
    pub fn new(
        action: Action,
        quantity: Quantity,
        resource: ResourceName,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            action,
            quantity,
            resource,
            occurred_at,
        }
    }
}

impl Catalog {
    /// Decide which event a mutation produces, without mutating state.
    ///
    /// - USE of an unknown name → `NotFound`
    /// - USE beyond the stored quantity → `InsufficientStock`, no event
    /// - RETURN of an unknown name → `NotFound`
    /// - otherwise exactly one [`UsageEvent`] stamped with the mutation's
    ///   `occurred_at`
    pub fn decide(&self, mutation: &StockMutation) -> DomainResult<UsageEvent> {
        let record = self
            .lookup(&mutation.resource)
            .ok_or_else(|| DomainError::not_found(mutation.resource.as_str()))?;

        if mutation.action == Action::Use && record.total_quantity < mutation.quantity.get() {
            return Err(DomainError::insufficient_stock(
                mutation.resource.as_str(),
                record.total_quantity,
                mutation.quantity.get(),
            ));
        }

        Ok(UsageEvent::record(
            mutation.action,
            mutation.resource.clone(),
            mutation.quantity,
            mutation.occurred_at,
        ))
    }

    /// Evolve the cached quantity from an event.
    ///
    /// Events are facts already validated by `decide`; applying one never
    /// fails. An event for a name no longer in the catalog is a no-op.
    pub fn apply(&mut self, event: &UsageEvent) {
        if let Some(record) = self.lookup_mut(&event.resource) {
            match event.action {
                Action::Use => {
                    record.total_quantity = record.total_quantity.saturating_sub(event.quantity.get());
                }
                Action::Return => {
                    record.total_quantity = record.total_quantity.saturating_add(event.quantity.get());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use crate::record::ResourceRecord;

    use super::*;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap()
    }

    fn mutation(action: Action, qty: u64, resource: &str) -> StockMutation {
        StockMutation::new(
            action,
            Quantity::new(qty).unwrap(),
            ResourceName::new(resource),
            at(),
        )
    }

    fn catalog_with(name: &str, qty: u64) -> Catalog {
        Catalog::from_records(vec![ResourceRecord::new(name, qty)]).unwrap()
    }

    #[test]
    fn use_decrements_stock_and_produces_one_event() {
        let mut catalog = catalog_with("Ethanol", 50);
        let event = catalog.decide(&mutation(Action::Use, 10, "ethanol")).unwrap();

        assert_eq!(event.action, Action::Use);
        assert_eq!(event.resource, ResourceName::new("ethanol"));
        assert_eq!(event.quantity.get(), 10);
        assert_eq!(event.occurred_at, at());

        catalog.apply(&event);
        assert_eq!(
            catalog.lookup(&ResourceName::new("ethanol")).unwrap().total_quantity,
            40
        );
    }

    #[test]
    fn return_increments_stock_unbounded() {
        let mut catalog = catalog_with("Gloves", 3);
        let event = catalog.decide(&mutation(Action::Return, 7, "gloves")).unwrap();
        catalog.apply(&event);

        assert_eq!(
            catalog.lookup(&ResourceName::new("gloves")).unwrap().total_quantity,
            10
        );
    }

    #[test]
    fn unknown_resource_is_not_found_for_both_actions() {
        let catalog = catalog_with("Ethanol", 50);

        let err = catalog.decide(&mutation(Action::Use, 1, "beaker")).unwrap_err();
        assert_eq!(err, DomainError::not_found("beaker"));

        let err = catalog
            .decide(&mutation(Action::Return, 1, "beaker"))
            .unwrap_err();
        assert_eq!(err, DomainError::not_found("beaker"));
    }

    #[test]
    fn use_of_exactly_stock_plus_one_fails_exactly_stock_succeeds() {
        let mut catalog = catalog_with("Ethanol", 5);

        let err = catalog.decide(&mutation(Action::Use, 6, "ethanol")).unwrap_err();
        assert_eq!(err, DomainError::insufficient_stock("ethanol", 5, 6));
        // Failure paths leave the catalog untouched.
        assert_eq!(
            catalog.lookup(&ResourceName::new("ethanol")).unwrap().total_quantity,
            5
        );

        let event = catalog.decide(&mutation(Action::Use, 5, "ethanol")).unwrap();
        catalog.apply(&event);
        assert_eq!(
            catalog.lookup(&ResourceName::new("ethanol")).unwrap().total_quantity,
            0
        );
    }

    mod proptest_tests {
        use proptest::prelude::*;

        use super::*;

        fn arb_step() -> impl Strategy<Value = (Action, u64)> {
            (prop_oneof![Just(Action::Use), Just(Action::Return)], 1u64..40)
        }

        proptest! {
            /// Conservation: the final quantity equals
            /// Q0 − Σ(accepted USE) + Σ(accepted RETURN), and the stored
            /// quantity never goes negative at any intermediate step.
            #[test]
            fn quantity_is_conserved_and_never_negative(
                q0 in 0u64..100,
                steps in proptest::collection::vec(arb_step(), 0..32),
            ) {
                let mut catalog = catalog_with("Ethanol", q0);
                let mut used: u64 = 0;
                let mut returned: u64 = 0;

                for (action, qty) in steps {
                    let m = mutation(action, qty, "ethanol");
                    match catalog.decide(&m) {
                        Ok(event) => {
                            catalog.apply(&event);
                            match action {
                                Action::Use => used += qty,
                                Action::Return => returned += qty,
                            }
                        }
                        Err(err) => prop_assert!(
                            matches!(err, DomainError::InsufficientStock { .. }),
                            "unexpected error: {err}"
                        ),
                    }

                    let current = catalog
                        .lookup(&ResourceName::new("ethanol"))
                        .unwrap()
                        .total_quantity;
                    prop_assert_eq!(current, q0 + returned - used);
                }
            }
        }
    }
}
