use std::path::PathBuf;
use std::sync::{Mutex, OnceLock, PoisonError};

use productlist_core::ProductId;
use productlist_products::{Catalog, Product};

use super::r#trait::{ProductRepository, ProductStoreError};
use super::source::{JsonFileSource, ProductSource, StaticSource};

/// Load-once catalog store over a [`ProductSource`].
///
/// - The first access reads the source under a mutex; concurrent first
///   requests wait for it and then share its result.
/// - A load is all-or-nothing: the snapshot is published only after the whole
///   dataset parsed and passed the unique-id check.
/// - After a successful load every read is lock-free.
#[derive(Debug)]
pub struct LazyProductStore<S> {
    source: S,
    catalog: OnceLock<Catalog>,
    load_lock: Mutex<()>,
}

impl<S> LazyProductStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            catalog: OnceLock::new(),
            load_lock: Mutex::new(()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.get().is_some()
    }
}

impl LazyProductStore<JsonFileSource> {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(JsonFileSource::new(path))
    }
}

impl LazyProductStore<StaticSource> {
    pub fn from_products(products: Vec<Product>) -> Self {
        Self::new(StaticSource::new(products))
    }
}

impl<S: ProductSource> LazyProductStore<S> {
    fn snapshot(&self) -> Result<Catalog, ProductStoreError> {
        if let Some(catalog) = self.catalog.get() {
            return Ok(catalog.clone());
        }

        // The guard only serializes loaders; it protects no data itself.
        let _guard = self.load_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(catalog) = self.catalog.get() {
            return Ok(catalog.clone());
        }

        let source_name = self.source.describe();
        tracing::info!(source = %source_name, "loading products");

        let catalog = self
            .source
            .read()
            .map_err(|e| format!("{e:#}"))
            .and_then(|products| Catalog::new(products).map_err(|e| e.to_string()))
            .map_err(|reason| {
                tracing::error!(source = %source_name, %reason, "failed to load products");
                ProductStoreError::LoadFailure {
                    source_name: source_name.clone(),
                    reason,
                }
            })?;

        tracing::info!(source = %source_name, count = catalog.len(), "products loaded");
        let _ = self.catalog.set(catalog.clone());
        Ok(catalog)
    }
}

impl<S: ProductSource> ProductRepository for LazyProductStore<S> {
    fn load(&self) -> Result<(), ProductStoreError> {
        self.snapshot().map(|_| ())
    }

    fn all(&self) -> Result<Catalog, ProductStoreError> {
        self.snapshot()
    }

    fn by_id(&self, product_id: &ProductId) -> Result<Product, ProductStoreError> {
        self.snapshot()?
            .get(product_id)
            .cloned()
            .ok_or_else(|| ProductStoreError::NotFound(product_id.clone()))
    }
}
