use std::io;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use portfolio_charges::{ChargeDefinitionCommand, ChargeDefinitionService};
use portfolio_commands::InMemoryCommandQueue;
use portfolio_infra::{
    ApplyError, ChargeCommandHandler, CommandWorker, InMemoryChargeDefinitionStore,
    InMemoryProductRegistry, ServiceConfig, WorkerHandle, seed,
};

pub type ChargeService = ChargeDefinitionService<
    Arc<InMemoryProductRegistry>,
    Arc<InMemoryChargeDefinitionStore>,
    InMemoryCommandQueue<ChargeDefinitionCommand>,
>;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to spawn command worker: {0}")]
    Worker(#[from] io::Error),

    #[error("failed to seed products: {0}")]
    Seed(#[from] ApplyError),
}

/// Everything the HTTP handlers need, shared behind an `Arc`.
#[derive(Debug)]
pub struct AppServices {
    charges: ChargeService,
    registry: Arc<InMemoryProductRegistry>,
    worker: Mutex<Option<WorkerHandle>>,
}

impl AppServices {
    pub fn charges(&self) -> &ChargeService {
        &self.charges
    }

    /// Product registry backing the existence gate (startup seeding and tests register here).
    pub fn registry(&self) -> &Arc<InMemoryProductRegistry> {
        &self.registry
    }

    /// Stop the command worker after it has applied everything already queued.
    ///
    /// Idempotent; later calls do nothing.
    pub fn shutdown(&self) {
        let handle = match self.worker.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(handle) = handle {
            handle.shutdown();
            tracing::info!("command worker stopped");
        }
    }
}

/// Wire the in-memory registry/store, the bounded command queue and its worker.
pub fn build_in_memory_services(config: &ServiceConfig) -> Result<AppServices, StartupError> {
    let registry = Arc::new(InMemoryProductRegistry::new());
    let store = Arc::new(InMemoryChargeDefinitionStore::new());
    seed::seed_products(&registry, &store, &config.seed_products)?;

    let (queue, receiver) = InMemoryCommandQueue::bounded(config.command_queue_capacity);
    let handler = ChargeCommandHandler::new(store.clone());
    let worker = CommandWorker::spawn("charge-command-worker", receiver, move |envelope| {
        handler.handle(envelope)
    })?;

    tracing::info!(
        capacity = queue.capacity(),
        seeded_products = config.seed_products.len(),
        "charge services ready"
    );

    Ok(AppServices {
        charges: ChargeDefinitionService::new(registry.clone(), store, queue),
        registry,
        worker: Mutex::new(Some(worker)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use portfolio_charges::{ChargeDefinition, LifecycleError};
    use portfolio_commands::SubmissionError;
    use portfolio_core::{ChargeDefinitionId, ProductId};

    fn services() -> AppServices {
        let config = ServiceConfig {
            seed_products: vec![ProductId::new("P1")],
            ..ServiceConfig::default()
        };
        build_in_memory_services(&config).unwrap()
    }

    #[test]
    fn submissions_after_shutdown_are_closed() {
        let services = services();
        let candidate = ChargeDefinition::bare(ChargeDefinitionId::new("C1"));
        assert!(services.charges().create(ProductId::new("P1"), candidate).is_ok());

        services.shutdown();

        // the queued create was drained before the worker stopped
        assert_eq!(services.charges().list(&ProductId::new("P1")).unwrap().len(), 5);
        assert!(matches!(
            services.charges().create(ProductId::new("P1"), ChargeDefinition::bare(ChargeDefinitionId::new("C2"))),
            Err(LifecycleError::Submission(SubmissionError::Closed))
        ));
    }

    #[test]
    fn shutdown_is_idempotent() {
        let services = services();
        services.shutdown();
        services.shutdown();
        assert_eq!(services.charges().list(&ProductId::new("P1")).unwrap().len(), 4);
    }
}
