//! Catalog store boundary.
//!
//! This module defines the read-only `ProductRepository` capability and a
//! load-once implementation over pluggable dataset sources, without making any
//! storage assumptions in the query layer.

pub mod lazy;
pub mod source;
pub mod r#trait;

pub use lazy::LazyProductStore;
pub use r#trait::{ProductRepository, ProductStoreError};
pub use source::{JsonFileSource, ProductSource, StaticSource};

/// Store backed by a JSON file on disk (production wiring).
pub type JsonFileProductStore = LazyProductStore<JsonFileSource>;

/// Store backed by an in-process product list (tests/dev).
pub type InMemoryProductStore = LazyProductStore<StaticSource>;
