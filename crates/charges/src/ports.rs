//! Collaborator capabilities consumed by the lifecycle manager.
//!
//! The product registry and the charge store are owned by other parts of the
//! system. The lifecycle manager only ever *reads* through these traits; writes
//! happen in the command substrate.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use portfolio_core::{ChargeDefinitionId, ProductId};

use crate::charge::ChargeDefinition;

/// A financial product, as far as this crate cares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub identifier: ProductId,
    pub name: String,
}

impl Product {
    pub fn new(identifier: ProductId, name: impl Into<String>) -> Self {
        Self {
            identifier,
            name: name.into(),
        }
    }
}

/// A lookup could not be answered (as opposed to answering "absent").
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("{store} unavailable: {reason}")]
    Unavailable { store: &'static str, reason: String },
}

impl LookupError {
    pub fn unavailable(store: &'static str, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            store,
            reason: reason.into(),
        }
    }
}

/// Lookup-by-identifier over the product registry.
pub trait ProductRegistry: Send + Sync {
    fn find_product(&self, product_id: &ProductId) -> Result<Option<Product>, LookupError>;
}

/// Read access to persisted charge definitions.
pub trait ChargeDefinitionStore: Send + Sync {
    /// All definitions owned by the product, in the store's natural order.
    fn find_all(&self, product_id: &ProductId) -> Result<Vec<ChargeDefinition>, LookupError>;

    fn find_one(
        &self,
        product_id: &ProductId,
        charge_definition_id: &ChargeDefinitionId,
    ) -> Result<Option<ChargeDefinition>, LookupError>;
}

impl<R> ProductRegistry for Arc<R>
where
    R: ProductRegistry + ?Sized,
{
    fn find_product(&self, product_id: &ProductId) -> Result<Option<Product>, LookupError> {
        (**self).find_product(product_id)
    }
}

impl<S> ChargeDefinitionStore for Arc<S>
where
    S: ChargeDefinitionStore + ?Sized,
{
    fn find_all(&self, product_id: &ProductId) -> Result<Vec<ChargeDefinition>, LookupError> {
        (**self).find_all(product_id)
    }

    fn find_one(
        &self,
        product_id: &ProductId,
        charge_definition_id: &ChargeDefinitionId,
    ) -> Result<Option<ChargeDefinition>, LookupError> {
        (**self).find_one(product_id, charge_definition_id)
    }
}
