//! Catalog query facade (application-level orchestration).
//!
//! Composes a [`ProductRepository`] with the pure query stages from
//! `productlist-products`:
//!
//! ```text
//! list       = paginate(repository.all(), page request)
//! get_by_id  = repository.by_id(id)
//! search     = filter pipeline over repository.all()
//! ```
//!
//! Every query works on the repository's immutable snapshot, so the service
//! can be shared across request handlers without locking.

use productlist_core::ProductId;
use productlist_products::{paginate, search, Catalog, PageRequest, Product, SearchCriteria};

use crate::product_store::{ProductRepository, ProductStoreError};

#[derive(Debug, Clone)]
pub struct CatalogQueryService<R> {
    repository: R,
}

impl<R> CatalogQueryService<R>
where
    R: ProductRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// One ordered page of the catalog.
    pub fn list(&self, request: &PageRequest) -> Result<Vec<Product>, ProductStoreError> {
        tracing::info!(
            page = request.page,
            size = request.size,
            sort = ?request.sort,
            direction = ?request.direction,
            "retrieving products with pagination"
        );
        let catalog = self.repository.all()?;
        Ok(paginate(catalog.products(), request))
    }

    /// The whole catalog in load order.
    pub fn list_all(&self) -> Result<Catalog, ProductStoreError> {
        tracing::info!("retrieving all products");
        self.repository.all()
    }

    pub fn get_by_id(&self, product_id: &ProductId) -> Result<Product, ProductStoreError> {
        tracing::info!(%product_id, "retrieving product");
        self.repository.by_id(product_id).inspect_err(|e| {
            if matches!(e, ProductStoreError::NotFound(_)) {
                tracing::warn!(%product_id, "product not found");
            }
        })
    }

    /// Products matching `criteria`; empty when nothing matches.
    pub fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Product>, ProductStoreError> {
        tracing::info!(
            name = ?criteria.name_contains,
            specifications = ?criteria.spec_filter,
            rating_min = %criteria.rating_min,
            rating_max = %criteria.rating_max,
            price_min = %criteria.price_min,
            price_max = %criteria.price_max,
            "searching products by params"
        );
        let catalog = self.repository.all()?;
        Ok(search(catalog.products(), criteria))
    }
}
