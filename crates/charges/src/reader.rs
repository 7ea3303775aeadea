use portfolio_core::{ChargeDefinitionId, DomainError, ProductId};

use crate::charge::ChargeDefinition;
use crate::error::LifecycleError;
use crate::ports::ChargeDefinitionStore;

/// Read-only queries over a product's charge definitions.
///
/// Callers are expected to have passed the product gate already.
#[derive(Debug, Clone)]
pub struct ChargeDefinitionReader<S> {
    store: S,
}

impl<S: ChargeDefinitionStore> ChargeDefinitionReader<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn list_all(&self, product_id: &ProductId) -> Result<Vec<ChargeDefinition>, LifecycleError> {
        Ok(self.store.find_all(product_id)?)
    }

    pub fn get_one(
        &self,
        product_id: &ProductId,
        charge_definition_id: &ChargeDefinitionId,
    ) -> Result<ChargeDefinition, LifecycleError> {
        self.store
            .find_one(product_id, charge_definition_id)?
            .ok_or_else(|| {
                DomainError::not_found(format!(
                    "No charge definition with the identifier '{charge_definition_id}' found."
                ))
                .into()
            })
    }
}
