use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::gateway::Accepted;

/// Envelope for a command accepted onto a queue.
///
/// - `command_id` is a UUIDv7, so ids sort by acceptance time.
/// - `accepted_at` is when the gateway took ownership, not when the command ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEnvelope<C> {
    command_id: Uuid,
    accepted_at: DateTime<Utc>,
    command: C,
}

impl<C> CommandEnvelope<C> {
    /// Wrap a command, stamping a fresh id and the current time.
    pub fn new(command: C) -> Self {
        Self {
            command_id: Uuid::now_v7(),
            accepted_at: Utc::now(),
            command,
        }
    }

    pub fn command_id(&self) -> Uuid {
        self.command_id
    }

    pub fn accepted_at(&self) -> DateTime<Utc> {
        self.accepted_at
    }

    pub fn command(&self) -> &C {
        &self.command
    }

    pub fn into_command(self) -> C {
        self.command
    }

    /// The acknowledgment handed back to the submitter.
    pub fn acknowledgment(&self) -> Accepted {
        Accepted {
            command_id: self.command_id,
            accepted_at: self.accepted_at,
        }
    }
}
