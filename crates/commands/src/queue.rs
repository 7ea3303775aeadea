//! In-memory bounded command queue for tests/dev.

use std::sync::mpsc::{self, Receiver, RecvError, RecvTimeoutError, SyncSender, TryRecvError, TrySendError};
use std::time::Duration;

use tracing::warn;

use crate::command::Command;
use crate::envelope::CommandEnvelope;
use crate::gateway::{Accepted, CommandGateway, SubmissionError};

/// Producer side of a bounded in-process command queue.
///
/// - Never blocks: a full queue is reported as `SubmissionError::QueueFull`
/// - FIFO: a single consumer sees commands in acceptance order
/// - Cheap to clone; all clones feed the same receiver
#[derive(Debug, Clone)]
pub struct InMemoryCommandQueue<C> {
    sender: SyncSender<CommandEnvelope<C>>,
    capacity: usize,
}

/// Consumer side of an [`InMemoryCommandQueue`].
///
/// Designed for a single consuming thread (see the command worker in infra).
#[derive(Debug)]
pub struct CommandReceiver<C> {
    receiver: Receiver<CommandEnvelope<C>>,
}

impl<C> InMemoryCommandQueue<C> {
    /// Create a queue holding at most `capacity` unapplied commands.
    ///
    /// A capacity of zero is bumped to one: a rendezvous channel would make every
    /// submission fail unless the worker happened to be blocked in `recv`.
    pub fn bounded(capacity: usize) -> (Self, CommandReceiver<C>) {
        let capacity = capacity.max(1);
        let (sender, receiver) = mpsc::sync_channel(capacity);
        (Self { sender, capacity }, CommandReceiver { receiver })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<C: Command> CommandGateway<C> for InMemoryCommandQueue<C> {
    fn submit(&self, command: C) -> Result<Accepted, SubmissionError> {
        let envelope = CommandEnvelope::new(command);
        let accepted = envelope.acknowledgment();
        let command_type = envelope.command().command_type();

        match self.sender.try_send(envelope) {
            Ok(()) => Ok(accepted),
            Err(TrySendError::Full(_)) => {
                warn!(command_type, capacity = self.capacity, "command queue full");
                Err(SubmissionError::QueueFull {
                    capacity: self.capacity,
                })
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!(command_type, "command queue closed");
                Err(SubmissionError::Closed)
            }
        }
    }
}

impl<C> CommandReceiver<C> {
    /// Block until the next command is available.
    pub fn recv(&self) -> Result<CommandEnvelope<C>, RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a command without blocking.
    pub fn try_recv(&self) -> Result<CommandEnvelope<C>, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a command.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<CommandEnvelope<C>, RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portfolio_core::ProductId;

    #[derive(Debug, Clone, PartialEq)]
    struct Touch(ProductId, u32);

    impl Command for Touch {
        fn command_type(&self) -> &'static str {
            "test.touch"
        }

        fn target_product(&self) -> &ProductId {
            &self.0
        }
    }

    fn touch(n: u32) -> Touch {
        Touch(ProductId::new("P1"), n)
    }

    #[test]
    fn submit_returns_acknowledgment_matching_envelope() {
        let (queue, rx) = InMemoryCommandQueue::bounded(4);
        let accepted = queue.submit(touch(1)).unwrap();

        let env = rx.try_recv().unwrap();
        assert_eq!(env.command_id(), accepted.command_id);
        assert_eq!(env.accepted_at(), accepted.accepted_at);
        assert_eq!(env.into_command(), touch(1));
    }

    #[test]
    fn commands_are_received_in_submission_order() {
        let (queue, rx) = InMemoryCommandQueue::bounded(8);
        for n in 0..5 {
            queue.submit(touch(n)).unwrap();
        }
        let seen: Vec<u32> = (0..5).map(|_| rx.try_recv().unwrap().into_command().1).collect();
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn full_queue_is_reported_not_blocked_on() {
        let (queue, _rx) = InMemoryCommandQueue::bounded(2);
        queue.submit(touch(1)).unwrap();
        queue.submit(touch(2)).unwrap();

        assert_eq!(
            queue.submit(touch(3)),
            Err(SubmissionError::QueueFull { capacity: 2 })
        );
    }

    #[test]
    fn dropped_receiver_closes_queue() {
        let (queue, rx) = InMemoryCommandQueue::<Touch>::bounded(2);
        drop(rx);
        assert_eq!(queue.submit(touch(1)), Err(SubmissionError::Closed));
    }

    #[test]
    fn zero_capacity_is_bumped_to_one() {
        let (queue, _rx) = InMemoryCommandQueue::<Touch>::bounded(0);
        assert_eq!(queue.capacity(), 1);
        assert!(queue.submit(touch(1)).is_ok());
    }

    #[test]
    fn accepted_serializes_in_camel_case() {
        let (queue, _rx) = InMemoryCommandQueue::bounded(1);
        let accepted = queue.submit(touch(1)).unwrap();
        let json = serde_json::to_value(accepted).unwrap();
        assert!(json.get("commandId").is_some());
        assert!(json.get("acceptedAt").is_some());
    }
}
