use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use portfolio_charges::{ChargeDefinition, ChargeDefinitionStore, LookupError};
use portfolio_core::{ChargeDefinitionId, Entity, ProductId};

use crate::command_handler::{ApplyError, ChargeDefinitionWriter};

const STORE: &str = "charge store";

/// In-memory charge definition store for tests/dev.
///
/// - Definitions are kept per product in insertion order, which is the order
///   `find_all` reports.
/// - Writes re-check existence and mutability under the write lock, so the
///   apply-time checks and the mutation are atomic.
#[derive(Debug, Default)]
pub struct InMemoryChargeDefinitionStore {
    inner: RwLock<HashMap<ProductId, Vec<ChargeDefinition>>>,
}

impl InMemoryChargeDefinitionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install system-defined definitions, bypassing the lifecycle rules.
    ///
    /// This is the only way a read-only definition enters the store. Existing
    /// definitions with the same identifier are overwritten in place.
    pub fn seed(
        &self,
        product_id: &ProductId,
        definitions: impl IntoIterator<Item = ChargeDefinition>,
    ) -> Result<(), ApplyError> {
        let mut map = self.write()?;
        let entries = map.entry(product_id.clone()).or_default();
        for definition in definitions {
            match entries
                .iter_mut()
                .find(|d| d.has_id(&definition.identifier))
            {
                Some(slot) => *slot = definition,
                None => entries.push(definition),
            }
        }
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<ProductId, Vec<ChargeDefinition>>>, LookupError> {
        self.inner
            .read()
            .map_err(|_| LookupError::unavailable(STORE, "lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<ProductId, Vec<ChargeDefinition>>>, ApplyError> {
        self.inner
            .write()
            .map_err(|_| ApplyError::Store(format!("{STORE}: lock poisoned")))
    }
}

impl ChargeDefinitionStore for InMemoryChargeDefinitionStore {
    fn find_all(&self, product_id: &ProductId) -> Result<Vec<ChargeDefinition>, LookupError> {
        Ok(self.read()?.get(product_id).cloned().unwrap_or_default())
    }

    fn find_one(
        &self,
        product_id: &ProductId,
        charge_definition_id: &ChargeDefinitionId,
    ) -> Result<Option<ChargeDefinition>, LookupError> {
        Ok(self.read()?.get(product_id).and_then(|defs| {
            defs.iter()
                .find(|d| d.has_id(charge_definition_id))
                .cloned()
        }))
    }
}

impl ChargeDefinitionWriter for InMemoryChargeDefinitionStore {
    fn insert(&self, product_id: &ProductId, definition: ChargeDefinition) -> Result<(), ApplyError> {
        let mut map = self.write()?;
        let entries = map.entry(product_id.clone()).or_default();
        if entries.iter().any(|d| d.has_id(&definition.identifier)) {
            return Err(ApplyError::Duplicate {
                product_id: product_id.clone(),
                charge_definition_id: definition.identifier,
            });
        }
        entries.push(definition);
        Ok(())
    }

    fn replace(&self, product_id: &ProductId, definition: ChargeDefinition) -> Result<(), ApplyError> {
        let mut map = self.write()?;
        let slot = mutable_slot(&map, product_id, &definition.identifier)?;
        map.get_mut(product_id)
            .map(|entries| entries[slot] = definition)
            .ok_or_else(|| ApplyError::Store(format!("{STORE}: product vanished under lock")))
    }

    fn remove(
        &self,
        product_id: &ProductId,
        charge_definition_id: &ChargeDefinitionId,
    ) -> Result<ChargeDefinition, ApplyError> {
        let mut map = self.write()?;
        let slot = mutable_slot(&map, product_id, charge_definition_id)?;
        map.get_mut(product_id)
            .map(|entries| entries.remove(slot))
            .ok_or_else(|| ApplyError::Store(format!("{STORE}: product vanished under lock")))
    }
}

/// Position of an existing, mutable definition.
fn mutable_slot(
    map: &HashMap<ProductId, Vec<ChargeDefinition>>,
    product_id: &ProductId,
    charge_definition_id: &ChargeDefinitionId,
) -> Result<usize, ApplyError> {
    let entries = map.get(product_id).map(Vec::as_slice).unwrap_or_default();
    let slot = entries
        .iter()
        .position(|d| d.has_id(charge_definition_id))
        .ok_or_else(|| ApplyError::NotFound {
            product_id: product_id.clone(),
            charge_definition_id: charge_definition_id.clone(),
        })?;

    if entries[slot].read_only {
        return Err(ApplyError::ReadOnly {
            product_id: product_id.clone(),
            charge_definition_id: charge_definition_id.clone(),
        });
    }
    Ok(slot)
}
