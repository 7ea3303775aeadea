//! Creation/modification/deletion rules for charge definitions.
//!
//! The validator is pure decision logic over the injected read store. It either
//! rejects a request with a [`DomainError`] or hands back an [`Admitted`] token;
//! the dispatcher only accepts work that carries one, so a command cannot be
//! built for a request that skipped validation.

use tracing::debug;

use portfolio_core::{ChargeDefinitionId, DomainError, ProductId};

use crate::charge::ChargeDefinition;
use crate::error::LifecycleError;
use crate::ports::ChargeDefinitionStore;

/// Proof that a mutation request passed validation.
///
/// Only this crate can mint one.
#[derive(Debug)]
#[must_use = "an admitted request should be dispatched"]
pub struct Admitted {
    _private: (),
}

impl Admitted {
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }
}

#[derive(Debug, Clone)]
pub struct ChargeDefinitionValidator<S> {
    store: S,
}

impl<S: ChargeDefinitionStore> ChargeDefinitionValidator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 1. read-only candidates are refused (only system seeding creates those)
    /// 2. the identifier must be free within the product
    pub fn validate_for_create(
        &self,
        product_id: &ProductId,
        candidate: &ChargeDefinition,
    ) -> Result<Admitted, LifecycleError> {
        if candidate.read_only {
            debug!(product = %product_id, charge = %candidate.identifier, "rejected: read-only create");
            return Err(DomainError::validation("Created charges cannot be read only.").into());
        }

        if let Some(existing) = self.store.find_one(product_id, &candidate.identifier)? {
            debug!(product = %product_id, charge = %existing.identifier, "rejected: duplicate identifier");
            return Err(DomainError::conflict(format!(
                "Duplicate identifier: {}",
                existing.identifier
            ))
            .into());
        }

        Ok(Admitted::new())
    }

    /// 1. the definition must exist and be mutable
    /// 2. the body may not rename it
    pub fn validate_for_change(
        &self,
        product_id: &ProductId,
        path_id: &ChargeDefinitionId,
        candidate: &ChargeDefinition,
    ) -> Result<Admitted, LifecycleError> {
        self.ensure_exists_and_mutable(product_id, path_id)?;

        if &candidate.identifier != path_id {
            debug!(
                product = %product_id,
                charge = %path_id,
                body_identifier = %candidate.identifier,
                "rejected: identifier change"
            );
            return Err(DomainError::validation("Instance identifiers may not be changed.").into());
        }

        Ok(Admitted::new())
    }

    pub fn validate_for_delete(
        &self,
        product_id: &ProductId,
        charge_definition_id: &ChargeDefinitionId,
    ) -> Result<Admitted, LifecycleError> {
        self.ensure_exists_and_mutable(product_id, charge_definition_id)?;
        Ok(Admitted::new())
    }

    fn ensure_exists_and_mutable(
        &self,
        product_id: &ProductId,
        charge_definition_id: &ChargeDefinitionId,
    ) -> Result<ChargeDefinition, LifecycleError> {
        let existing = self
            .store
            .find_one(product_id, charge_definition_id)?
            .ok_or_else(|| {
                debug!(product = %product_id, charge = %charge_definition_id, "rejected: unknown definition");
                DomainError::not_found(format!(
                    "No charge definition '{product_id}.{charge_definition_id}' found."
                ))
            })?;

        if existing.read_only {
            debug!(product = %product_id, charge = %charge_definition_id, "rejected: read-only definition");
            return Err(DomainError::conflict(format!(
                "Charge definition is read only '{charge_definition_id}'"
            ))
            .into());
        }

        Ok(existing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeWorld, charge, cid, pid};

    fn validator(world: FakeWorld) -> ChargeDefinitionValidator<FakeWorld> {
        ChargeDefinitionValidator::new(world)
    }

    fn rejection(result: Result<Admitted, LifecycleError>) -> DomainError {
        match result {
            Err(LifecycleError::Rejected(e)) => e,
            other => panic!("expected a rejection, got {other:?}"),
        }
    }

    #[test]
    fn create_of_fresh_mutable_definition_is_admitted() {
        let v = validator(FakeWorld::default().with_product("P1"));
        assert!(v.validate_for_create(&pid("P1"), &charge("C1", false)).is_ok());
    }

    #[test]
    fn create_read_only_is_bad_request_even_when_identifier_is_taken() {
        let v = validator(FakeWorld::default().with_charge("P1", charge("C1", false)));
        let err = rejection(v.validate_for_create(&pid("P1"), &charge("C1", true)));
        assert_eq!(err, DomainError::validation("Created charges cannot be read only."));
    }

    #[test]
    fn create_duplicate_is_conflict() {
        let v = validator(FakeWorld::default().with_charge("P1", charge("C1", false)));
        let err = rejection(v.validate_for_create(&pid("P1"), &charge("C1", false)));
        assert_eq!(err, DomainError::conflict("Duplicate identifier: C1"));
    }

    #[test]
    fn same_identifier_under_another_product_is_not_a_duplicate() {
        let v = validator(FakeWorld::default().with_charge("P1", charge("C1", false)));
        assert!(v.validate_for_create(&pid("P2"), &charge("C1", false)).is_ok());
    }

    #[test]
    fn change_of_missing_definition_is_not_found() {
        let v = validator(FakeWorld::default());
        let err = rejection(v.validate_for_change(&pid("P1"), &cid("C1"), &charge("C1", false)));
        assert_eq!(err, DomainError::not_found("No charge definition 'P1.C1' found."));
    }

    #[test]
    fn change_of_read_only_is_conflict_before_identifier_check() {
        let v = validator(FakeWorld::default().with_charge("P1", charge("C1", true)));
        let err = rejection(v.validate_for_change(&pid("P1"), &cid("C1"), &charge("C2", false)));
        assert_eq!(err, DomainError::conflict("Charge definition is read only 'C1'"));
    }

    #[test]
    fn change_with_renamed_body_is_bad_request() {
        let v = validator(FakeWorld::default().with_charge("P1", charge("C1", false)));
        let err = rejection(v.validate_for_change(&pid("P1"), &cid("C1"), &charge("C2", false)));
        assert_eq!(err, DomainError::validation("Instance identifiers may not be changed."));
    }

    #[test]
    fn change_keeping_identifier_is_admitted() {
        let v = validator(FakeWorld::default().with_charge("P1", charge("C1", false)));
        assert!(v.validate_for_change(&pid("P1"), &cid("C1"), &charge("C1", false)).is_ok());
    }

    #[test]
    fn delete_rules_follow_existence_then_mutability() {
        let v = validator(
            FakeWorld::default()
                .with_charge("P1", charge("C1", false))
                .with_charge("P1", charge("RO", true)),
        );
        assert!(v.validate_for_delete(&pid("P1"), &cid("C1")).is_ok());
        assert!(matches!(
            rejection(v.validate_for_delete(&pid("P1"), &cid("RO"))),
            DomainError::Conflict(_)
        ));
        assert!(matches!(
            rejection(v.validate_for_delete(&pid("P1"), &cid("nope"))),
            DomainError::NotFound(_)
        ));
    }
}
