//! Infrastructure layer: catalog stores, dataset sources, query facade, config.

pub mod catalog_query;
pub mod config;
pub mod product_store;

pub use catalog_query::CatalogQueryService;
pub use config::{AppConfig, ConfigError};
pub use product_store::{
    InMemoryProductStore, JsonFileProductStore, ProductRepository, ProductStoreError,
};
