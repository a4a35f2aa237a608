//! Immutable catalog snapshot.

use std::collections::HashMap;
use std::sync::Arc;

use productlist_core::{DomainError, DomainResult, ProductId};

use crate::product::Product;

/// Read-only, cheaply cloneable view over a loaded product collection.
///
/// Clones share the same allocation. No API hands out mutable access, so
/// queries running in parallel can never observe each other's work.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<[Product]>,
    index: Arc<HashMap<ProductId, usize>>,
}

impl Catalog {
    /// Build a snapshot, keeping load order.
    ///
    /// Fails with `DuplicateId` if two products share an identifier.
    pub fn new(products: Vec<Product>) -> DomainResult<Self> {
        let mut index = HashMap::with_capacity(products.len());
        for (pos, product) in products.iter().enumerate() {
            if index.insert(product.product_id().clone(), pos).is_some() {
                return Err(DomainError::duplicate_id(product.product_id()));
            }
        }

        Ok(Self {
            products: Arc::from(products),
            index: Arc::new(index),
        })
    }

    pub fn empty() -> Self {
        Self {
            products: Arc::from(Vec::<Product>::new()),
            index: Arc::new(HashMap::new()),
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Exact-match lookup by identifier.
    pub fn get(&self, product_id: &ProductId) -> Option<&Product> {
        self.index.get(product_id).map(|&pos| &self.products[pos])
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }
}
