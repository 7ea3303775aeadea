//! Charge-definition lifecycle manager.
//!
//! Decides whether a create/change/delete request against a product's charge
//! definitions is admissible and, when it is, hands an immutable command to the
//! asynchronous execution substrate. Reads are answered directly from the store.
//!
//! ## Two-phase execution
//!
//! 1. **Synchronous validation**: product gate, then lifecycle rules. Rejections
//!    have no side effects.
//! 2. **Asynchronous application**: the admitted command is queued; the caller
//!    gets an acknowledgment, not the applied state.
//!
//! ## Rules enforced here
//!
//! - the referenced product exists (checked before anything else)
//! - identifiers are unique within a product
//! - definitions created through the lifecycle API are never read-only
//! - read-only definitions are neither changed nor deleted
//! - an identifier never changes after creation
//!
//! Collaborators (product registry, charge store, command gateway) are injected
//! as trait parameters; see [`ports`] and [`portfolio_commands::CommandGateway`].

pub mod charge;
pub mod dispatcher;
pub mod error;
pub mod gate;
pub mod outcome;
pub mod ports;
pub mod reader;
pub mod service;
pub mod validator;

#[cfg(test)]
mod testing;

pub use charge::{
    ChangeChargeDefinition, ChargeDefinition, ChargeDefinitionCommand, ChargeMethod,
    CreateChargeDefinition, CycleSizeUnit, DeleteChargeDefinition, MAX_AMOUNT,
};
pub use dispatcher::LifecycleCommandDispatcher;
pub use error::LifecycleError;
pub use gate::ProductExistenceGate;
pub use outcome::{InfrastructureError, Outcome, OutcomeKind};
pub use ports::{ChargeDefinitionStore, LookupError, Product, ProductRegistry};
pub use reader::ChargeDefinitionReader;
pub use service::ChargeDefinitionService;
pub use validator::{Admitted, ChargeDefinitionValidator};
