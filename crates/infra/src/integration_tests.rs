//! Integration tests for the full lifecycle pipeline.
//!
//! Tests: Request → Gate → Validator → Queue → Worker → Handler → Store
//!
//! Verifies:
//! - Accepted commands become visible to reads once the worker applies them
//! - Rejected requests leave the store untouched
//! - Racing creates that both pass validation end with exactly one definition

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use rust_decimal::Decimal;

    use portfolio_charges::{
        ChargeDefinition, ChargeDefinitionCommand, ChargeDefinitionService, ChargeDefinitionStore,
        LifecycleError, Outcome, OutcomeKind,
    };
    use portfolio_commands::InMemoryCommandQueue;
    use portfolio_core::{ChargeDefinitionId, ProductId};

    use crate::command_handler::ChargeCommandHandler;
    use crate::read_model::{InMemoryChargeDefinitionStore, InMemoryProductRegistry};
    use crate::seed::seed_products;
    use crate::workers::{CommandWorker, WorkerHandle};

    type Service = ChargeDefinitionService<
        Arc<InMemoryProductRegistry>,
        Arc<InMemoryChargeDefinitionStore>,
        InMemoryCommandQueue<ChargeDefinitionCommand>,
    >;

    fn pid() -> ProductId {
        ProductId::new("consumer-loan")
    }

    fn fee(id: &str) -> ChargeDefinition {
        ChargeDefinition::fixed(ChargeDefinitionId::new(id), "Late fee", "ACCEPT_PAYMENT", Decimal::new(1500, 2))
    }

    fn setup() -> (Service, Arc<InMemoryChargeDefinitionStore>, WorkerHandle) {
        let registry = Arc::new(InMemoryProductRegistry::new());
        let store = Arc::new(InMemoryChargeDefinitionStore::new());
        seed_products(&registry, &store, &[pid()]).unwrap();

        let (queue, rx) = InMemoryCommandQueue::bounded(64);
        let handler = ChargeCommandHandler::new(store.clone());
        let worker = CommandWorker::spawn("charge-commands", rx, move |env| handler.handle(env)).unwrap();

        (ChargeDefinitionService::new(registry, store.clone(), queue), store, worker)
    }

    /// Helper: poll until the worker has applied what we expect.
    fn eventually(mut check: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(2);
        while Instant::now() < deadline {
            if check() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        check()
    }

    #[test]
    fn created_definition_becomes_readable() {
        let (service, _, worker) = setup();
        let id = ChargeDefinitionId::new("late-fee");

        let accepted = service.create(pid(), fee("late-fee")).unwrap();
        assert!(!accepted.command_id.is_nil());

        assert!(eventually(|| service.get(&pid(), &id).is_ok()));
        assert_eq!(service.get(&pid(), &id).unwrap(), fee("late-fee"));
        worker.shutdown();
    }

    #[test]
    fn change_then_delete_is_applied_in_order() {
        let (service, store, worker) = setup();
        let id = ChargeDefinitionId::new("late-fee");

        service.create(pid(), fee("late-fee")).unwrap();
        assert!(eventually(|| service.get(&pid(), &id).is_ok()));

        let changed = fee("late-fee").with_description("raised");
        service.change(pid(), &id, changed.clone()).unwrap();
        assert!(eventually(|| service.get(&pid(), &id) == Ok(changed.clone())));

        service.delete(pid(), id.clone()).unwrap();
        assert!(eventually(|| store.find_one(&pid(), &id).unwrap().is_none()));
        worker.shutdown();
    }

    #[test]
    fn seeded_definitions_stay_protected_end_to_end() {
        let (service, store, worker) = setup();
        let interest = ChargeDefinitionId::new("interest");

        let outcome: Outcome<()> = Outcome::from_command(service.delete(pid(), interest.clone()));
        assert_eq!(outcome.kind(), OutcomeKind::Conflict);
        worker.shutdown();

        assert!(store.find_one(&pid(), &interest).unwrap().is_some_and(|d| d.read_only));
    }

    #[test]
    fn racing_creates_leave_exactly_one_definition() {
        let (service, store, worker) = setup();

        // Both pass validation: neither is applied yet when the other is checked.
        let first = service.create(pid(), fee("dup"));
        let second = service.create(pid(), fee("dup").with_description("second"));
        assert!(first.is_ok());
        assert!(matches!(second, Ok(_) | Err(LifecycleError::Rejected(_))));

        worker.shutdown();

        let dups: Vec<_> = store
            .find_all(&pid())
            .unwrap()
            .into_iter()
            .filter(|d| d.identifier.as_str() == "dup")
            .collect();
        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].description, None);
    }
}
