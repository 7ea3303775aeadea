//! In-memory read-side adapters for the lifecycle manager's collaborators.

pub mod charge_store;
pub mod product_registry;

pub use charge_store::InMemoryChargeDefinitionStore;
pub use product_registry::InMemoryProductRegistry;
