//! The five lifecycle operations, composed from gate, reader, validator and dispatcher.
//!
//! Ordering per request:
//!
//! ```text
//! product gate  →  (queries)   reader
//!               →  (mutations) validator → dispatcher
//! ```
//!
//! The gate always runs first, so a missing product wins over every other
//! rejection. The service keeps no mutable state between requests.

use tracing::instrument;

use portfolio_commands::{Accepted, CommandGateway};
use portfolio_core::{ChargeDefinitionId, ProductId};

use crate::charge::{ChargeDefinition, ChargeDefinitionCommand};
use crate::dispatcher::LifecycleCommandDispatcher;
use crate::error::LifecycleError;
use crate::gate::ProductExistenceGate;
use crate::ports::{ChargeDefinitionStore, ProductRegistry};
use crate::reader::ChargeDefinitionReader;
use crate::validator::ChargeDefinitionValidator;

#[derive(Debug, Clone)]
pub struct ChargeDefinitionService<R, S, G> {
    gate: ProductExistenceGate<R>,
    reader: ChargeDefinitionReader<S>,
    validator: ChargeDefinitionValidator<S>,
    dispatcher: LifecycleCommandDispatcher<G>,
}

impl<R, S, G> ChargeDefinitionService<R, S, G>
where
    R: ProductRegistry,
    S: ChargeDefinitionStore + Clone,
    G: CommandGateway<ChargeDefinitionCommand>,
{
    pub fn new(registry: R, store: S, gateway: G) -> Self {
        Self {
            gate: ProductExistenceGate::new(registry),
            reader: ChargeDefinitionReader::new(store.clone()),
            validator: ChargeDefinitionValidator::new(store),
            dispatcher: LifecycleCommandDispatcher::new(gateway),
        }
    }

    /// The product precondition on its own, for transports that must answer it
    /// before looking at a request body.
    pub fn ensure_product_exists(&self, product_id: &ProductId) -> Result<(), LifecycleError> {
        self.gate.ensure_product_exists(product_id)
    }

    #[instrument(level = "debug", skip(self), fields(product = %product_id))]
    pub fn list(&self, product_id: &ProductId) -> Result<Vec<ChargeDefinition>, LifecycleError> {
        self.gate.ensure_product_exists(product_id)?;
        self.reader.list_all(product_id)
    }

    #[instrument(level = "debug", skip(self), fields(product = %product_id, charge = %charge_definition_id))]
    pub fn get(
        &self,
        product_id: &ProductId,
        charge_definition_id: &ChargeDefinitionId,
    ) -> Result<ChargeDefinition, LifecycleError> {
        self.gate.ensure_product_exists(product_id)?;
        self.reader.get_one(product_id, charge_definition_id)
    }

    #[instrument(level = "debug", skip(self, candidate), fields(product = %product_id, charge = %candidate.identifier))]
    pub fn create(
        &self,
        product_id: ProductId,
        candidate: ChargeDefinition,
    ) -> Result<Accepted, LifecycleError> {
        self.gate.ensure_product_exists(&product_id)?;
        let admitted = self.validator.validate_for_create(&product_id, &candidate)?;
        self.dispatcher.dispatch_create(admitted, product_id, candidate)
    }

    #[instrument(level = "debug", skip(self, candidate), fields(product = %product_id, charge = %charge_definition_id))]
    pub fn change(
        &self,
        product_id: ProductId,
        charge_definition_id: &ChargeDefinitionId,
        candidate: ChargeDefinition,
    ) -> Result<Accepted, LifecycleError> {
        self.gate.ensure_product_exists(&product_id)?;
        let admitted =
            self.validator
                .validate_for_change(&product_id, charge_definition_id, &candidate)?;
        self.dispatcher.dispatch_change(admitted, product_id, candidate)
    }

    #[instrument(level = "debug", skip(self), fields(product = %product_id, charge = %charge_definition_id))]
    pub fn delete(
        &self,
        product_id: ProductId,
        charge_definition_id: ChargeDefinitionId,
    ) -> Result<Accepted, LifecycleError> {
        self.gate.ensure_product_exists(&product_id)?;
        let admitted = self
            .validator
            .validate_for_delete(&product_id, &charge_definition_id)?;
        self.dispatcher
            .dispatch_delete(admitted, product_id, charge_definition_id)
    }
}
