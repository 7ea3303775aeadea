//! Infrastructure layer: in-memory adapters, command application, config.

pub mod command_handler;
pub mod config;
pub mod read_model;
pub mod seed;
pub mod workers;

mod integration_tests;

pub use command_handler::{ApplyError, ChargeCommandHandler, ChargeDefinitionWriter};
pub use config::{ConfigError, ServiceConfig};
pub use read_model::{InMemoryChargeDefinitionStore, InMemoryProductRegistry};
pub use workers::{CommandWorker, WorkerHandle};
