use std::sync::Arc;

use thiserror::Error;

use productlist_core::ProductId;
use productlist_products::{Catalog, Product};

/// Errors surfaced by catalog stores.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProductStoreError {
    /// The dataset is missing, unreadable or malformed. The store stays
    /// unloaded; the next access retries.
    #[error("failed to load products from {source_name}: {reason}")]
    LoadFailure { source_name: String, reason: String },

    /// No product has the requested identifier.
    #[error("product with id {0} not found")]
    NotFound(ProductId),
}

/// Read-only catalog capability.
///
/// Implementations populate themselves at most once (successfully) and hand
/// out immutable snapshots afterwards. Other backends (e.g. a database) can
/// satisfy this without touching the filter or sort stages.
pub trait ProductRepository: Send + Sync {
    /// Populate the store. A no-op once a load has succeeded.
    fn load(&self) -> Result<(), ProductStoreError>;

    /// Read-only snapshot of the whole catalog, loading first if needed.
    fn all(&self) -> Result<Catalog, ProductStoreError>;

    /// Exact-match lookup by identifier, loading first if needed.
    fn by_id(&self, product_id: &ProductId) -> Result<Product, ProductStoreError>;
}

impl<R> ProductRepository for Arc<R>
where
    R: ProductRepository + ?Sized,
{
    fn load(&self) -> Result<(), ProductStoreError> {
        (**self).load()
    }

    fn all(&self) -> Result<Catalog, ProductStoreError> {
        (**self).all()
    }

    fn by_id(&self, product_id: &ProductId) -> Result<Product, ProductStoreError> {
        (**self).by_id(product_id)
    }
}
