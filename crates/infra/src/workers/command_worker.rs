use std::io;
use std::sync::mpsc::{self, RecvTimeoutError, TryRecvError};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use portfolio_commands::{Command, CommandEnvelope, CommandReceiver};

/// Handle to control and join a background worker.
#[derive(Debug)]
pub struct WorkerHandle {
    shutdown: mpsc::Sender<()>,
    join: Option<thread::JoinHandle<()>>,
}

impl WorkerHandle {
    /// Request graceful shutdown and wait for the worker to stop.
    ///
    /// Commands already queued are applied before the worker exits.
    pub fn shutdown(mut self) {
        let _ = self.shutdown.send(());
        if let Some(j) = self.join.take() {
            let _ = j.join();
        }
    }
}

/// Generic command worker loop.
///
/// - Single consumer of a command queue, so commands apply in acceptance order
/// - Handler failures are logged and skipped; the queue keeps draining
/// - Supports graceful shutdown (drains what is queued, then stops)
#[derive(Debug)]
pub struct CommandWorker;

impl CommandWorker {
    /// Spawn a named worker thread applying every command from `receiver`.
    pub fn spawn<C, H, E>(
        name: &'static str,
        receiver: CommandReceiver<C>,
        mut handler: H,
    ) -> io::Result<WorkerHandle>
    where
        C: Command,
        H: FnMut(CommandEnvelope<C>) -> Result<(), E> + Send + 'static,
        E: core::fmt::Display + Send + 'static,
    {
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let join = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || worker_loop(name, receiver, shutdown_rx, &mut handler))?;

        Ok(WorkerHandle {
            shutdown: shutdown_tx,
            join: Some(join),
        })
    }
}

fn worker_loop<C, H, E>(
    name: &'static str,
    receiver: CommandReceiver<C>,
    shutdown_rx: mpsc::Receiver<()>,
    handler: &mut H,
) where
    C: Command,
    H: FnMut(CommandEnvelope<C>) -> Result<(), E>,
    E: core::fmt::Display,
{
    let tick = Duration::from_millis(100);

    loop {
        if shutdown_rx.try_recv().is_ok() {
            let drained = drain(name, &receiver, handler);
            debug!(worker = name, drained, "command worker stopping");
            break;
        }

        match receiver.recv_timeout(tick) {
            Ok(envelope) => apply(name, envelope, handler),
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

fn drain<C, H, E>(name: &'static str, receiver: &CommandReceiver<C>, handler: &mut H) -> usize
where
    C: Command,
    H: FnMut(CommandEnvelope<C>) -> Result<(), E>,
    E: core::fmt::Display,
{
    let mut drained = 0;
    loop {
        match receiver.try_recv() {
            Ok(envelope) => {
                apply(name, envelope, handler);
                drained += 1;
            }
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => return drained,
        }
    }
}

fn apply<C, H, E>(name: &'static str, envelope: CommandEnvelope<C>, handler: &mut H)
where
    C: Command,
    H: FnMut(CommandEnvelope<C>) -> Result<(), E>,
    E: core::fmt::Display,
{
    let command_id = envelope.command_id();
    let command_type = envelope.command().command_type();
    let product = envelope.command().target_product().clone();

    if let Err(err) = handler(envelope) {
        warn!(
            worker = name,
            %command_id,
            command_type,
            product = %product,
            error = %err,
            "command rejected at apply time"
        );
    }
}
