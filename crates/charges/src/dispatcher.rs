//! Translation of admitted requests into lifecycle commands.
//!
//! ## Dispatch flow
//!
//! ```text
//! Admitted request
//!   ↓
//! 1. Build the command (Create / Change / Delete)
//!   ↓
//! 2. Submit to the gateway (returns once queued)
//!   ↓
//! 3. Hand the acknowledgment back to the caller
//! ```
//!
//! Nothing here waits for the command to be applied. Every method consumes an
//! [`Admitted`] token, so a request can only be dispatched once and only after
//! it passed the validator.

use tracing::{error, info};

use portfolio_commands::{Accepted, Command, CommandGateway};
use portfolio_core::{ChargeDefinitionId, ProductId};

use crate::charge::{
    ChangeChargeDefinition, ChargeDefinition, ChargeDefinitionCommand, CreateChargeDefinition,
    DeleteChargeDefinition,
};
use crate::error::LifecycleError;
use crate::validator::Admitted;

#[derive(Debug, Clone)]
pub struct LifecycleCommandDispatcher<G> {
    gateway: G,
}

impl<G> LifecycleCommandDispatcher<G>
where
    G: CommandGateway<ChargeDefinitionCommand>,
{
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub fn dispatch_create(
        &self,
        _admitted: Admitted,
        product_id: ProductId,
        definition: ChargeDefinition,
    ) -> Result<Accepted, LifecycleError> {
        self.submit(ChargeDefinitionCommand::Create(CreateChargeDefinition {
            product_id,
            definition,
        }))
    }

    pub fn dispatch_change(
        &self,
        _admitted: Admitted,
        product_id: ProductId,
        definition: ChargeDefinition,
    ) -> Result<Accepted, LifecycleError> {
        self.submit(ChargeDefinitionCommand::Change(ChangeChargeDefinition {
            product_id,
            definition,
        }))
    }

    pub fn dispatch_delete(
        &self,
        _admitted: Admitted,
        product_id: ProductId,
        charge_definition_id: ChargeDefinitionId,
    ) -> Result<Accepted, LifecycleError> {
        self.submit(ChargeDefinitionCommand::Delete(DeleteChargeDefinition {
            product_id,
            charge_definition_id,
        }))
    }

    fn submit(&self, command: ChargeDefinitionCommand) -> Result<Accepted, LifecycleError> {
        let command_type = command.command_type();
        let product = command.target_product().clone();
        let charge = command.charge_definition_id().clone();

        match self.gateway.submit(command) {
            Ok(accepted) => {
                info!(
                    command_type,
                    product = %product,
                    charge = %charge,
                    command_id = %accepted.command_id,
                    "lifecycle command accepted"
                );
                Ok(accepted)
            }
            Err(e) => {
                error!(
                    command_type,
                    product = %product,
                    charge = %charge,
                    error = %e,
                    "lifecycle command submission failed"
                );
                Err(e.into())
            }
        }
    }
}
