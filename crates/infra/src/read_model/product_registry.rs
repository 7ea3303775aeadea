use std::collections::HashMap;
use std::sync::RwLock;

use portfolio_charges::{LookupError, Product, ProductRegistry};
use portfolio_core::ProductId;

use crate::command_handler::ApplyError;

/// In-memory product registry for tests/dev.
///
/// Products are registered at startup (see `seed`); the lifecycle manager only reads.
#[derive(Debug, Default)]
pub struct InMemoryProductRegistry {
    inner: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryProductRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or rename) a product.
    pub fn register(&self, product: Product) -> Result<(), ApplyError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| ApplyError::Store("product registry: lock poisoned".to_string()))?;
        map.insert(product.identifier.clone(), product);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ProductRegistry for InMemoryProductRegistry {
    fn find_product(&self, product_id: &ProductId) -> Result<Option<Product>, LookupError> {
        let map = self
            .inner
            .read()
            .map_err(|_| LookupError::unavailable("product registry", "lock poisoned"))?;
        Ok(map.get(product_id).cloned())
    }
}
