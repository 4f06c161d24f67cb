//! Product catalog: loading, lookup and rendering

use std::sync::Arc;

use tracing::debug;

mod loader;
mod product;
mod render;

pub use loader::{CatalogLoader, CatalogSource, LoadError, parse_catalog};
pub use product::{Product, ProductId};
pub use render::{CatalogView, PLACEHOLDER_MESSAGE, ProductCard, categories, filter_by_category};

/// Read-only product list
///
/// Products are shared through `Arc` so that the selection and the chat
/// session hold references into the catalog rather than copies.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Arc<Product>>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        debug!(count = products.len(), "Catalog::new: called");
        Self {
            products: products.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn products(&self) -> &[Arc<Product>] {
        &self.products
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Product>> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    pub fn categories(&self) -> Vec<&str> {
        categories(&self.products)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
