use tracing::debug;

use portfolio_core::{DomainError, ProductId};

use crate::error::LifecycleError;
use crate::ports::ProductRegistry;

pub(crate) const INVALID_PRODUCT: &str = "Invalid product referenced.";

/// Precondition shared by every operation: the product must exist.
#[derive(Debug, Clone)]
pub struct ProductExistenceGate<R> {
    registry: R,
}

impl<R: ProductRegistry> ProductExistenceGate<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    pub fn ensure_product_exists(&self, product_id: &ProductId) -> Result<(), LifecycleError> {
        match self.registry.find_product(product_id)? {
            Some(_) => Ok(()),
            None => {
                debug!(product = %product_id, "rejected: unknown product");
                Err(DomainError::not_found(INVALID_PRODUCT).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{LookupError, Product};

    struct OneProduct;

    impl ProductRegistry for OneProduct {
        fn find_product(&self, product_id: &ProductId) -> Result<Option<Product>, LookupError> {
            Ok((product_id.as_str() == "P1").then(|| Product::new(product_id.clone(), "Loan")))
        }
    }

    struct Down;

    impl ProductRegistry for Down {
        fn find_product(&self, _: &ProductId) -> Result<Option<Product>, LookupError> {
            Err(LookupError::unavailable("product registry", "connection refused"))
        }
    }

    #[test]
    fn existing_product_passes() {
        let gate = ProductExistenceGate::new(OneProduct);
        assert_eq!(gate.ensure_product_exists(&ProductId::new("P1")), Ok(()));
    }

    #[test]
    fn missing_product_is_not_found() {
        let gate = ProductExistenceGate::new(OneProduct);
        assert_eq!(
            gate.ensure_product_exists(&ProductId::new("Pmissing")),
            Err(LifecycleError::Rejected(DomainError::not_found(INVALID_PRODUCT)))
        );
    }

    #[test]
    fn registry_failure_is_not_a_rejection() {
        let gate = ProductExistenceGate::new(Down);
        let err = gate.ensure_product_exists(&ProductId::new("P1")).unwrap_err();
        assert!(matches!(err, LifecycleError::Lookup(_)));
        assert!(err.as_rejection().is_none());
    }
}
