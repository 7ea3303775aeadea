//! `portfolio-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! strongly-typed identifiers, the entity abstraction and the domain error model
//! shared by the charge lifecycle crates.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ChargeDefinitionId, ProductId, MAX_IDENTIFIER_LEN};
