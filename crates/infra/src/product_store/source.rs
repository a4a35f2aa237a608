//! Dataset sources: where a store's products come from.

use std::path::PathBuf;

use anyhow::Context;

use productlist_products::Product;

/// A fully-materialized product sequence provider.
///
/// Called at most once per successful store load; a failed read may be
/// retried on the next access.
pub trait ProductSource: Send + Sync {
    /// Human-readable origin, used in logs and load errors.
    fn describe(&self) -> String;

    fn read(&self) -> anyhow::Result<Vec<Product>>;
}

/// JSON array of product records in a file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ProductSource for JsonFileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    fn read(&self) -> anyhow::Result<Vec<Product>> {
        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("could not read {}", self.path.display()))?;
        let products: Vec<Product> =
            serde_json::from_slice(&bytes).context("could not parse product list")?;
        Ok(products)
    }
}

/// Products already held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    products: Vec<Product>,
}

impl StaticSource {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

impl ProductSource for StaticSource {
    fn describe(&self) -> String {
        format!("in-memory list ({} products)", self.products.len())
    }

    fn read(&self) -> anyhow::Result<Vec<Product>> {
        Ok(self.products.clone())
    }
}
