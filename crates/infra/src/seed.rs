//! System-defined products and charge definitions installed at startup.

use rust_decimal::Decimal;
use tracing::info;

use portfolio_charges::{ChargeDefinition, ChargeMethod, CycleSizeUnit, Product};
use portfolio_core::{ChargeDefinitionId, ProductId};

use crate::command_handler::ApplyError;
use crate::read_model::{InMemoryChargeDefinitionStore, InMemoryProductRegistry};

/// The read-only charges every seeded product carries.
pub fn default_charge_definitions() -> Vec<ChargeDefinition> {
    vec![
        system_charge("processing-fee", "Processing fee", "OPEN", ChargeMethod::Fixed, None)
            .with_description("Fee charged when the case is opened."),
        system_charge("disbursement-fee", "Disbursement fee", "DISBURSE", ChargeMethod::Proportional, None)
            .with_description("Fee charged as a share of the disbursed amount."),
        ChargeDefinition {
            accrue_action: Some("APPLY_INTEREST".to_string()),
            accrual_account_designator: Some("interest-accrual".to_string()),
            ..system_charge("interest", "Interest", "ACCEPT_PAYMENT", ChargeMethod::Interest, Some(CycleSizeUnit::Years))
        },
        system_charge("repayment", "Repayment", "ACCEPT_PAYMENT", ChargeMethod::Proportional, Some(CycleSizeUnit::Months)),
    ]
}

fn system_charge(
    identifier: &str,
    name: &str,
    charge_action: &str,
    charge_method: ChargeMethod,
    for_cycle_size_unit: Option<CycleSizeUnit>,
) -> ChargeDefinition {
    ChargeDefinition {
        charge_method: Some(charge_method),
        for_cycle_size_unit,
        ..ChargeDefinition::fixed(ChargeDefinitionId::new(identifier), name, charge_action, Decimal::ZERO)
    }
    .with_read_only(true)
}

/// Register each product and give it the default read-only charge set.
pub fn seed_products(
    registry: &InMemoryProductRegistry,
    store: &InMemoryChargeDefinitionStore,
    products: &[ProductId],
) -> Result<(), ApplyError> {
    for product_id in products {
        registry.register(Product::new(product_id.clone(), product_id.as_str()))?;
        store.seed(product_id, default_charge_definitions())?;
        info!(product = %product_id, "seeded product with default charges");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use portfolio_charges::{ChargeDefinitionStore, ProductRegistry};

    #[test]
    fn defaults_are_read_only_and_structurally_valid() {
        let defaults = default_charge_definitions();
        assert_eq!(defaults.len(), 4);
        for def in &defaults {
            assert!(def.read_only, "{} should be read only", def.identifier);
            assert_eq!(def.validate_structure(), Ok(()));
        }
    }

    #[test]
    fn seeding_registers_products_and_is_repeatable() {
        let registry = InMemoryProductRegistry::new();
        let store = InMemoryChargeDefinitionStore::new();
        let products = [ProductId::new("P1"), ProductId::new("P2")];

        seed_products(&registry, &store, &products).unwrap();
        seed_products(&registry, &store, &products).unwrap();

        assert!(registry.find_product(&ProductId::new("P2")).unwrap().is_some());
        assert_eq!(store.find_all(&ProductId::new("P1")).unwrap().len(), 4);
    }
}
