//! Command submission abstraction (fire-and-acknowledge).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Acknowledgment that a command was queued for execution.
///
/// This says nothing about whether the command has been applied yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accepted {
    pub command_id: Uuid,
    pub accepted_at: DateTime<Utc>,
}

/// The substrate refused to take a command.
///
/// These are infrastructure failures. They are never produced by request
/// validation and are not retried by the submitter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// The queue is at capacity.
    #[error("command queue is full (capacity {capacity})")]
    QueueFull { capacity: usize },

    /// The consuming side of the queue is gone.
    #[error("command queue is closed")]
    Closed,
}

/// Hands commands to the asynchronous execution substrate.
///
/// `submit` returns as soon as the command is accepted for execution and must
/// not wait for it to be applied. Implementations must be safe to share across
/// request handlers.
pub trait CommandGateway<C>: Send + Sync {
    fn submit(&self, command: C) -> Result<Accepted, SubmissionError>;
}

impl<C, G> CommandGateway<C> for Arc<G>
where
    G: CommandGateway<C> + ?Sized,
{
    fn submit(&self, command: C) -> Result<Accepted, SubmissionError> {
        (**self).submit(command)
    }
}
