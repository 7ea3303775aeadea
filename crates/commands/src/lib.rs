//! Commands and their transport to the asynchronous execution substrate.
//!
//! A command is an immutable description of an intended state change. Callers
//! hand commands to a [`CommandGateway`], which acknowledges them as soon as they
//! are durably queued; a separate worker drains the queue and applies them.

pub mod command;
pub mod envelope;
pub mod gateway;
pub mod queue;

pub use command::Command;
pub use envelope::CommandEnvelope;
pub use gateway::{Accepted, CommandGateway, SubmissionError};
pub use queue::{CommandReceiver, InMemoryCommandQueue};
