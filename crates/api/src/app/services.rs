use std::sync::Arc;

use productlist_infra::{AppConfig, CatalogQueryService, JsonFileProductStore, ProductRepository};

/// Catalog store shared by every request handler.
pub type SharedRepository = Arc<dyn ProductRepository>;

pub struct AppServices {
    catalog: CatalogQueryService<SharedRepository>,
}

impl AppServices {
    pub fn new(repository: SharedRepository) -> Self {
        Self {
            catalog: CatalogQueryService::new(repository),
        }
    }

    pub fn catalog(&self) -> &CatalogQueryService<SharedRepository> {
        &self.catalog
    }
}

/// Wire the JSON-file store named by `config`. Nothing is read until the first request.
pub fn build_services(config: &AppConfig) -> AppServices {
    tracing::info!(path = %config.product_file.display(), "using JSON product dataset");
    let store = JsonFileProductStore::open(config.product_file.clone());
    AppServices::new(Arc::new(store))
}
