//! Selection store: the products the user has picked
//!
//! An insertion-ordered set keyed by product id. Entries are shared
//! references into the catalog. There is no removal operation.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::catalog::{Product, ProductId};

#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    items: Vec<Arc<Product>>,
    ids: HashSet<ProductId>,
    revision: u64,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `product` unless its id is already present
    ///
    /// Returns true when the store changed. Callers re-render the selection
    /// display on a true return.
    pub fn add(&mut self, product: Arc<Product>) -> bool {
        if self.ids.contains(&product.id) {
            debug!(id = %product.id, "SelectionStore::add: already selected");
            return false;
        }
        debug!(id = %product.id, "SelectionStore::add: inserted");
        self.ids.insert(product.id.clone());
        self.items.push(product);
        self.revision += 1;
        true
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.ids.contains(id)
    }

    /// Selected products in insertion order
    pub fn all(&self) -> &[Arc<Product>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bumped on every successful insert
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
