//! Hand-rolled collaborators for unit tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use rust_decimal::Decimal;

use portfolio_commands::{Accepted, CommandEnvelope, CommandGateway, SubmissionError};
use portfolio_core::{ChargeDefinitionId, ProductId};

use crate::charge::{ChargeDefinition, ChargeDefinitionCommand};
use crate::ports::{ChargeDefinitionStore, LookupError, Product, ProductRegistry};

pub(crate) fn pid(s: &str) -> ProductId {
    ProductId::new(s)
}

pub(crate) fn cid(s: &str) -> ChargeDefinitionId {
    ChargeDefinitionId::new(s)
}

pub(crate) fn charge(id: &str, read_only: bool) -> ChargeDefinition {
    ChargeDefinition::fixed(cid(id), format!("{id} fee"), "DISBURSE", Decimal::new(1000, 2))
        .with_read_only(read_only)
}

/// Registry + store backed by plain maps; products are keyed, charges ordered by id.
#[derive(Debug, Default)]
pub(crate) struct FakeWorld {
    products: BTreeMap<ProductId, Product>,
    charges: BTreeMap<ProductId, BTreeMap<ChargeDefinitionId, ChargeDefinition>>,
}

impl FakeWorld {
    pub(crate) fn with_product(mut self, id: &str) -> Self {
        self.products
            .insert(pid(id), Product::new(pid(id), format!("{id} product")));
        self
    }

    pub(crate) fn with_charge(mut self, product: &str, def: ChargeDefinition) -> Self {
        self.charges
            .entry(pid(product))
            .or_default()
            .insert(def.identifier.clone(), def);
        self
    }
}

impl ProductRegistry for FakeWorld {
    fn find_product(&self, product_id: &ProductId) -> Result<Option<Product>, LookupError> {
        Ok(self.products.get(product_id).cloned())
    }
}

impl ChargeDefinitionStore for FakeWorld {
    fn find_all(&self, product_id: &ProductId) -> Result<Vec<ChargeDefinition>, LookupError> {
        Ok(self
            .charges
            .get(product_id)
            .map(|m| m.values().cloned().collect())
            .unwrap_or_default())
    }

    fn find_one(
        &self,
        product_id: &ProductId,
        charge_definition_id: &ChargeDefinitionId,
    ) -> Result<Option<ChargeDefinition>, LookupError> {
        Ok(self
            .charges
            .get(product_id)
            .and_then(|m| m.get(charge_definition_id))
            .cloned())
    }
}

/// Gateway that records what it was handed, optionally refusing everything.
#[derive(Debug, Default)]
pub(crate) struct RecordingGateway {
    pub(crate) submitted: Mutex<Vec<ChargeDefinitionCommand>>,
    pub(crate) refuse: Option<SubmissionError>,
}

impl RecordingGateway {
    pub(crate) fn refusing(err: SubmissionError) -> Self {
        Self {
            submitted: Mutex::new(Vec::new()),
            refuse: Some(err),
        }
    }

    pub(crate) fn submitted(&self) -> Vec<ChargeDefinitionCommand> {
        self.submitted.lock().unwrap().clone()
    }
}

impl CommandGateway<ChargeDefinitionCommand> for RecordingGateway {
    fn submit(&self, command: ChargeDefinitionCommand) -> Result<Accepted, SubmissionError> {
        if let Some(err) = &self.refuse {
            return Err(err.clone());
        }
        let envelope = CommandEnvelope::new(command);
        let accepted = envelope.acknowledgment();
        self.submitted.lock().unwrap().push(envelope.into_command());
        Ok(accepted)
    }
}
