//! Apply-side of the lifecycle commands.
//!
//! The lifecycle manager validates against a snapshot of the store and then lets
//! go; by the time a command is applied the store may have moved on (two
//! concurrent creates of the same identifier both pass validation). The handler
//! therefore re-checks every rule at apply time. Because a single worker drains
//! the queue, commands for a product are applied in acceptance order and the
//! first of two racing creates wins.
//!
//! ```text
//! CommandEnvelope
//!   ↓
//! 1. Re-check (exists / free / mutable) under the store's write lock
//!   ↓
//! 2. Mutate the store, or report an ApplyError
//! ```

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use portfolio_charges::{ChargeDefinition, ChargeDefinitionCommand};
use portfolio_commands::{Command, CommandEnvelope};
use portfolio_core::{ChargeDefinitionId, ProductId};

/// Why an accepted command was not applied.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplyError {
    #[error("charge definition '{product_id}.{charge_definition_id}' already exists")]
    Duplicate {
        product_id: ProductId,
        charge_definition_id: ChargeDefinitionId,
    },

    #[error("charge definition '{product_id}.{charge_definition_id}' does not exist")]
    NotFound {
        product_id: ProductId,
        charge_definition_id: ChargeDefinitionId,
    },

    #[error("charge definition '{product_id}.{charge_definition_id}' is read only")]
    ReadOnly {
        product_id: ProductId,
        charge_definition_id: ChargeDefinitionId,
    },

    #[error("store failure: {0}")]
    Store(String),
}

/// Conditional writes against the charge store.
///
/// Each method performs its precondition check and the mutation atomically.
pub trait ChargeDefinitionWriter: Send + Sync {
    /// Fails with `Duplicate` when the identifier is taken.
    fn insert(&self, product_id: &ProductId, definition: ChargeDefinition) -> Result<(), ApplyError>;

    /// Fails with `NotFound` / `ReadOnly`.
    fn replace(&self, product_id: &ProductId, definition: ChargeDefinition) -> Result<(), ApplyError>;

    /// Fails with `NotFound` / `ReadOnly`.
    fn remove(
        &self,
        product_id: &ProductId,
        charge_definition_id: &ChargeDefinitionId,
    ) -> Result<ChargeDefinition, ApplyError>;
}

impl<W> ChargeDefinitionWriter for Arc<W>
where
    W: ChargeDefinitionWriter + ?Sized,
{
    fn insert(&self, product_id: &ProductId, definition: ChargeDefinition) -> Result<(), ApplyError> {
        (**self).insert(product_id, definition)
    }

    fn replace(&self, product_id: &ProductId, definition: ChargeDefinition) -> Result<(), ApplyError> {
        (**self).replace(product_id, definition)
    }

    fn remove(
        &self,
        product_id: &ProductId,
        charge_definition_id: &ChargeDefinitionId,
    ) -> Result<ChargeDefinition, ApplyError> {
        (**self).remove(product_id, charge_definition_id)
    }
}

/// Applies lifecycle commands to the charge store.
#[derive(Debug, Clone)]
pub struct ChargeCommandHandler<W> {
    store: W,
}

impl<W: ChargeDefinitionWriter> ChargeCommandHandler<W> {
    pub fn new(store: W) -> Self {
        Self { store }
    }

    pub fn handle(&self, envelope: CommandEnvelope<ChargeDefinitionCommand>) -> Result<(), ApplyError> {
        let command_id = envelope.command_id();
        let command_type = envelope.command().command_type();
        let product = envelope.command().target_product().clone();
        let charge = envelope.command().charge_definition_id().clone();

        match envelope.into_command() {
            ChargeDefinitionCommand::Create(cmd) => self.store.insert(&cmd.product_id, cmd.definition)?,
            ChargeDefinitionCommand::Change(cmd) => self.store.replace(&cmd.product_id, cmd.definition)?,
            ChargeDefinitionCommand::Delete(cmd) => {
                self.store
                    .remove(&cmd.product_id, &cmd.charge_definition_id)?;
            }
        }

        info!(
            %command_id,
            command_type,
            product = %product,
            charge = %charge,
            "lifecycle command applied"
        );
        Ok(())
    }
}
